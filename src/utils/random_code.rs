use rand::Rng;

const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const PASSWORD_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";

fn generate_from(charset: &[u8], length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..charset.len());
            charset[idx] as char
        })
        .collect()
}

/// 生成训练代码（大写字母 + 数字）
pub fn generate_random_code(length: usize) -> String {
    generate_from(CODE_CHARSET, length)
}

/// 生成随机密码
pub fn generate_random_password(length: usize) -> String {
    generate_from(PASSWORD_CHARSET, length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_charset() {
        let code = generate_random_code(8);
        assert_eq!(code.len(), 8);
        assert!(
            code.chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_password_length() {
        assert_eq!(generate_random_password(16).chars().count(), 16);
    }
}
