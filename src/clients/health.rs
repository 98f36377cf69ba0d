use tracing::{debug, warn};

use crate::{
    clients::database::DatabaseClient,
    models::health::{HealthResponse, MysqlStatus},
};

pub struct HealthChecker {
    database: DatabaseClient,
}

impl HealthChecker {
    pub fn new(database: DatabaseClient) -> Self {
        Self { database }
    }

    pub async fn check_mysql(&self) -> HealthResponse {
        match self.database.ping().await {
            Ok(_) => {
                debug!("MySQL health check passed");
                HealthResponse {
                    mysql: MysqlStatus::Up,
                }
            }
            Err(e) => {
                warn!(error = %e, "MySQL health check failed");
                HealthResponse {
                    mysql: MysqlStatus::Down,
                }
            }
        }
    }
}
