//! Generación de claves de token
//!
//! Las claves son opacas: 40 caracteres hexadecimales derivados de 20
//! bytes aleatorios del sistema operativo.

use rand::RngCore;

pub const TOKEN_KEY_LEN: usize = 40;

pub fn generate_token_key() -> String {
    let mut bytes = [0u8; TOKEN_KEY_LEN / 2];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
