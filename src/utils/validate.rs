use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("Invalid email regex")
});

const MIN_PASSWORD_LEN: usize = 8;

// 常见弱密码，比较时忽略大小写
const COMMON_PASSWORDS: &[&str] = &[
    "password1",
    "qwerty123",
    "letmein123",
    "welcome123",
    "abcd1234",
    "drills123",
];

/// 邮箱统一为去空白、小写
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err("Email format is invalid")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordIssue {
    TooShort,
    MissingUppercase,
    MissingLowercase,
    MissingDigit,
    TooCommon,
}

impl PasswordIssue {
    pub fn message(&self) -> &'static str {
        match self {
            PasswordIssue::TooShort => "Password must be at least 8 characters long",
            PasswordIssue::MissingUppercase => "Password must contain an uppercase letter",
            PasswordIssue::MissingLowercase => "Password must contain a lowercase letter",
            PasswordIssue::MissingDigit => "Password must contain a digit",
            PasswordIssue::TooCommon => "Password is too common",
        }
    }
}

/// 列出密码不满足的所有规则，空列表表示通过
pub fn password_issues(password: &str) -> Vec<PasswordIssue> {
    let checks: [(bool, PasswordIssue); 5] = [
        (
            password.chars().count() >= MIN_PASSWORD_LEN,
            PasswordIssue::TooShort,
        ),
        (
            password.chars().any(|c| c.is_ascii_uppercase()),
            PasswordIssue::MissingUppercase,
        ),
        (
            password.chars().any(|c| c.is_ascii_lowercase()),
            PasswordIssue::MissingLowercase,
        ),
        (
            password.chars().any(|c| c.is_ascii_digit()),
            PasswordIssue::MissingDigit,
        ),
        (
            !COMMON_PASSWORDS
                .iter()
                .any(|common| password.eq_ignore_ascii_case(common)),
            PasswordIssue::TooCommon,
        ),
    ];

    checks
        .into_iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, issue)| issue)
        .collect()
}

pub fn validate_password(password: &str) -> Result<(), String> {
    let issues = password_issues(password);
    if issues.is_empty() {
        return Ok(());
    }
    Err(issues
        .iter()
        .map(PasswordIssue::message)
        .collect::<Vec<_>>()
        .join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("admin@localhost.dev").is_ok());
        assert!(validate_email("trainee.one+drills@mail.example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("two@@example.com").is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Sam@Example.COM "), "sam@example.com");
    }

    #[test]
    fn test_strong_password_has_no_issues() {
        assert!(password_issues("Drill4Ever").is_empty());
        assert!(validate_password("Grader2024x").is_ok());
    }

    #[test]
    fn test_weak_password_reports_every_issue() {
        assert_eq!(
            password_issues("abc"),
            vec![
                PasswordIssue::TooShort,
                PasswordIssue::MissingUppercase,
                PasswordIssue::MissingDigit,
            ]
        );
        assert_eq!(password_issues("ABCDEFGH1"), vec![PasswordIssue::MissingLowercase]);
    }

    #[test]
    fn test_common_password_rejected() {
        assert_eq!(password_issues("Password1"), vec![PasswordIssue::TooCommon]);
        let msg = validate_password("Qwerty123").unwrap_err();
        assert_eq!(msg, "Password is too common");
    }
}
