use crate::config::{AppConfig, SeedConfig};
use crate::models::drills::requests::{CreateDrillRequest, DrillListQuery};
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_random_password;
use crate::utils::validate::normalize_email;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 初始化默认管理员账号
/// 如果数据库中没有任何用户，则创建一个评估员身份的 admin 账号
async fn seed_admin(storage: &dyn Storage, seed: &SeedConfig, password: Option<String>) {
    // 检查是否已有用户
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} user(s), skipping admin seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating default admin account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    // 获取密码：优先从环境变量，否则生成随机密码
    let password = password.unwrap_or_else(|| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin_request = CreateUserRequest {
        email: normalize_email(&seed.admin_email),
        password: password_hash,
        name: Some(seed.admin_name.clone()),
        is_trainee: false,
        is_assessor: true,
    };

    match storage.create_user(admin_request).await {
        Ok(user) => {
            info!(
                "Default admin account created successfully (ID: {}, email: {})",
                user.id, user.email
            );
        }
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
        }
    }
}

/// 数据库中没有任何训练时创建默认训练（随机生成唯一代码）
async fn seed_default_drill(storage: &dyn Storage, seed: &SeedConfig) {
    let query = DrillListQuery {
        page: Some(1),
        size: Some(1),
        ..Default::default()
    };
    match storage.list_drills_with_pagination(query).await {
        Ok(list) if list.pagination.total > 0 => {
            debug!("Drills already exist, skipping default drill seed");
            return;
        }
        Ok(_) => {}
        Err(e) => {
            warn!("Failed to list drills: {}, skipping default drill seed", e);
            return;
        }
    }

    let request = CreateDrillRequest {
        name: seed.default_drill_name.clone(),
        num_questions: seed.default_drill_questions,
        due_date: None,
        tags: None,
    };

    match storage.create_drill(request).await {
        Ok(drill) => info!(
            "Default drill created (ID: {}, code: {})",
            drill.id, drill.code
        ),
        Err(e) => warn!("Failed to create default drill: {}", e),
    }
}

/// 准备服务器启动的上下文
/// 包括存储初始化和种子数据
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    let seed = &AppConfig::get().seed;
    seed_admin(storage.as_ref(), seed, std::env::var("ADMIN_PASSWORD").ok()).await;
    seed_default_drill(storage.as_ref(), seed).await;

    StartupContext { storage }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    fn seed_config() -> SeedConfig {
        SeedConfig {
            admin_email: "admin@localhost".to_string(),
            admin_name: "Administrator".to_string(),
            default_drill_name: "Orientation Drill".to_string(),
            default_drill_questions: 1,
        }
    }

    #[tokio::test]
    async fn test_seed_creates_admin_assessor_once() {
        let storage = SeaOrmStorage::in_memory().await;
        let seed = seed_config();

        seed_admin(&storage, &seed, Some("Seeded-Password1".to_string())).await;
        seed_admin(&storage, &seed, Some("Seeded-Password1".to_string())).await;

        assert_eq!(storage.count_users().await.unwrap(), 1);
        let admin = storage
            .get_user_by_email("admin@localhost")
            .await
            .unwrap()
            .unwrap();
        assert!(admin.is_assessor);
        assert!(!admin.is_trainee);
        assert_ne!(admin.password_hash, "Seeded-Password1");
        assert!(crate::utils::password::verify_password(
            "Seeded-Password1",
            &admin.password_hash
        ));
    }

    #[tokio::test]
    async fn test_seed_creates_default_drill_with_code() {
        let storage = SeaOrmStorage::in_memory().await;
        let seed = seed_config();

        seed_default_drill(&storage, &seed).await;
        seed_default_drill(&storage, &seed).await;

        let list = storage
            .list_drills_with_pagination(DrillListQuery::default())
            .await
            .unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].name, "Orientation Drill");
        assert_eq!(list.items[0].code.len(), 8);
    }
}
