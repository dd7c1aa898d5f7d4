use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    /// 签发时的角色，逗号分隔，如 "trainee,assessor"
    pub roles: String,
    pub token_type: TokenKind,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse::<i64>().ok()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn sign(
        user_id: i64,
        roles: &str,
        kind: TokenKind,
        ttl: chrono::Duration,
    ) -> Result<String, JwtError> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            roles: roles.to_string(),
            token_type: kind,
            exp: (now + ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        let secret = &AppConfig::get().jwt.secret;
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    fn verify(token: &str, expected: TokenKind) -> Result<Claims, JwtError> {
        let secret = &AppConfig::get().jwt.secret;
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?
        .claims;

        if claims.token_type != expected {
            return Err(ErrorKind::InvalidToken.into());
        }
        Ok(claims)
    }

    pub fn generate_access_token(user_id: i64, roles: &str) -> Result<String, JwtError> {
        let minutes = AppConfig::get().jwt.access_token_expiry;
        Self::sign(
            user_id,
            roles,
            TokenKind::Access,
            chrono::Duration::minutes(minutes),
        )
    }

    /// `ttl` 为空时使用配置中的 refresh token 有效期（天）
    pub fn generate_token_pair(
        user_id: i64,
        roles: &str,
        ttl: Option<chrono::Duration>,
    ) -> Result<TokenPair, JwtError> {
        let ttl = ttl
            .unwrap_or_else(|| chrono::Duration::days(AppConfig::get().jwt.refresh_token_expiry));
        Ok(TokenPair {
            access_token: Self::generate_access_token(user_id, roles)?,
            refresh_token: Self::sign(user_id, roles, TokenKind::Refresh, ttl)?,
        })
    }

    pub fn verify_access_token(token: &str) -> Result<Claims, JwtError> {
        Self::verify(token, TokenKind::Access)
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims, JwtError> {
        Self::verify(token, TokenKind::Refresh)
    }

    /// 用 refresh token 换一个新的 access token
    pub fn refresh_access_token(refresh_token: &str) -> Result<String, JwtError> {
        let claims = Self::verify_refresh_token(refresh_token)?;
        let user_id = claims.user_id().ok_or(ErrorKind::InvalidToken)?;
        Self::generate_access_token(user_id, &claims.roles)
    }

    // HttpOnly，生产环境要求 HTTPS
    fn session_cookie(
        name: &'static str,
        value: &str,
        max_age: CookieDuration,
        same_site: SameSite,
    ) -> Cookie<'static> {
        Cookie::build(name, value.to_string())
            .path("/")
            .max_age(max_age)
            .same_site(same_site)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    pub fn create_refresh_token_cookie(refresh_token: &str) -> Cookie<'static> {
        let days = AppConfig::get().jwt.refresh_token_expiry;
        Self::session_cookie(
            REFRESH_TOKEN_COOKIE,
            refresh_token,
            CookieDuration::days(days),
            SameSite::Strict,
        )
    }

    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        Self::session_cookie(
            REFRESH_TOKEN_COOKIE,
            "",
            CookieDuration::ZERO,
            SameSite::Strict,
        )
    }

    /// 页面会话使用的 access token cookie
    pub fn create_access_token_cookie(access_token: &str) -> Cookie<'static> {
        let minutes = AppConfig::get().jwt.access_token_expiry;
        Self::session_cookie(
            ACCESS_TOKEN_COOKIE,
            access_token,
            CookieDuration::minutes(minutes),
            SameSite::Lax,
        )
    }

    pub fn create_empty_access_token_cookie() -> Cookie<'static> {
        Self::session_cookie(ACCESS_TOKEN_COOKIE, "", CookieDuration::ZERO, SameSite::Lax)
    }

    pub fn extract_refresh_token_from_cookie(req: &HttpRequest) -> Option<String> {
        req.cookie(REFRESH_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty())
    }

    /// 优先 Authorization 头，其次 Cookie
    pub fn extract_access_token(req: &HttpRequest) -> Option<String> {
        let from_header = req
            .headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        from_header.or_else(|| {
            req.cookie(ACCESS_TOKEN_COOKIE)
                .map(|cookie| cookie.value().to_string())
                .filter(|token| !token.is_empty())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let pair = JwtUtils::generate_token_pair(3, "trainee,assessor", None).unwrap();
        let claims = JwtUtils::verify_access_token(&pair.access_token).unwrap();
        assert_eq!(claims.user_id(), Some(3));
        assert_eq!(claims.roles, "trainee,assessor");
        assert_eq!(claims.token_type, TokenKind::Access);
        assert!(JwtUtils::verify_refresh_token(&pair.access_token).is_err());
        assert!(JwtUtils::verify_access_token(&pair.refresh_token).is_err());
    }

    #[test]
    fn test_refresh_issues_new_access_token() {
        let pair = JwtUtils::generate_token_pair(9, "assessor", None).unwrap();
        let access = JwtUtils::refresh_access_token(&pair.refresh_token).unwrap();
        let claims = JwtUtils::verify_access_token(&access).unwrap();
        assert_eq!(claims.user_id(), Some(9));
        assert_eq!(claims.roles, "assessor");
        assert!(JwtUtils::refresh_access_token(&pair.access_token).is_err());
    }

    #[test]
    fn test_extract_access_token_from_header_or_cookie() {
        use actix_web::test::TestRequest;

        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer abc"))
            .to_http_request();
        assert_eq!(JwtUtils::extract_access_token(&req).as_deref(), Some("abc"));

        let req = TestRequest::default()
            .cookie(Cookie::new(ACCESS_TOKEN_COOKIE, "xyz"))
            .to_http_request();
        assert_eq!(JwtUtils::extract_access_token(&req).as_deref(), Some("xyz"));

        let req = TestRequest::default().to_http_request();
        assert!(JwtUtils::extract_access_token(&req).is_none());
    }

    #[test]
    fn test_cleared_cookies_expire_immediately() {
        let cookie = JwtUtils::create_empty_refresh_token_cookie();
        assert_eq!(cookie.name(), REFRESH_TOKEN_COOKIE);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(CookieDuration::ZERO));
        assert_eq!(cookie.http_only(), Some(true));
    }
}
