//! 页面静态资源路由
//!
//! 使用 rust-embed 在编译时嵌入 static/ 目录（样式表等）

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;
use std::path::Path;

#[derive(Embed)]
#[folder = "static/"]
struct StaticAssets;

/// 获取文件的 MIME 类型
fn get_mime_type(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    match ext {
        "css" => "text/css; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff2" => "font/woff2",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// 检查是否应该设置长期缓存
fn should_cache(path: &str) -> bool {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    matches!(ext, "css" | "js" | "png" | "svg" | "ico" | "woff2")
}

pub async fn serve_static(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');

    match StaticAssets::get(path) {
        Some(file) => {
            let mut response = HttpResponse::Ok();
            response.content_type(get_mime_type(path));

            if should_cache(path) {
                response.insert_header(("Cache-Control", "public, max-age=86400"));
            }

            Ok(response.body(file.data.into_owned()))
        }
        None => Ok(HttpResponse::NotFound()
            .content_type("text/plain; charset=utf-8")
            .body("Not Found")),
    }
}

pub fn configure_static_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/static/{tail:.*}", web::get().to(serve_static));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test as actix_test};

    #[test]
    fn test_get_mime_type() {
        assert_eq!(get_mime_type("style.css"), "text/css; charset=utf-8");
        assert_eq!(get_mime_type("logo.svg"), "image/svg+xml");
        assert_eq!(get_mime_type("unknown.xyz"), "application/octet-stream");
    }

    #[test]
    fn test_should_cache() {
        assert!(should_cache("style.css"));
        assert!(!should_cache("notes.txt"));
    }

    #[actix_web::test]
    async fn test_serves_embedded_stylesheet() {
        let app = actix_test::init_service(App::new().configure(configure_static_routes)).await;

        let req = actix_test::TestRequest::get().uri("/static/style.css").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let req = actix_test::TestRequest::get().uri("/static/missing.css").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
