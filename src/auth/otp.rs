use rand::Rng;

/// Uniform 0..=9999, zero-padded to four digits.
pub fn generate_otp() -> String {
    let code: u16 = rand::thread_rng().gen_range(0..=9999);
    format!("{code:04}")
}
