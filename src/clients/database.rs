use anyhow::{Error, Result, anyhow};
use sqlx::{Connection, MySqlPool, Row, mysql::MySqlPoolOptions};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{
    campaign::{
        CampaignDetails, CampaignType, CampaignView, EmailDetails, OnSiteDetails, PushDetails,
        SmsDetails, VoiceDetails,
    },
    error::ApiError,
};

const CREATE_PARENT_TABLE: &str = "\
    CREATE TABLE IF NOT EXISTS campaign (
        id VARCHAR(36) NOT NULL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        `type` VARCHAR(16) NOT NULL
    )";

const CREATE_CHILD_TABLES: [&str; 5] = [
    "CREATE TABLE IF NOT EXISTS campaign_onsite (
        id VARCHAR(36) NOT NULL PRIMARY KEY,
        placeholder VARCHAR(255) NOT NULL,
        component VARCHAR(255) NOT NULL,
        width VARCHAR(32) NOT NULL,
        height VARCHAR(32) NOT NULL,
        FOREIGN KEY (id) REFERENCES campaign (id)
    )",
    "CREATE TABLE IF NOT EXISTS campaign_sms (
        id VARCHAR(36) NOT NULL PRIMARY KEY,
        message TEXT NOT NULL,
        sender_name VARCHAR(255) NOT NULL,
        sender_phone VARCHAR(32) NOT NULL,
        FOREIGN KEY (id) REFERENCES campaign (id)
    )",
    "CREATE TABLE IF NOT EXISTS campaign_email (
        id VARCHAR(36) NOT NULL PRIMARY KEY,
        message TEXT NOT NULL,
        sender_name VARCHAR(255) NOT NULL,
        sender_email VARCHAR(255) NOT NULL,
        FOREIGN KEY (id) REFERENCES campaign (id)
    )",
    "CREATE TABLE IF NOT EXISTS campaign_voice (
        id VARCHAR(36) NOT NULL PRIMARY KEY,
        audio_name VARCHAR(255) NOT NULL,
        caller_id VARCHAR(64) NOT NULL,
        FOREIGN KEY (id) REFERENCES campaign (id)
    )",
    "CREATE TABLE IF NOT EXISTS campaign_push (
        id VARCHAR(36) NOT NULL PRIMARY KEY,
        message TEXT NOT NULL,
        sender VARCHAR(255) NOT NULL,
        FOREIGN KEY (id) REFERENCES campaign (id)
    )",
];

#[derive(Clone)]
pub struct DatabaseClient {
    pool: MySqlPool,
}

impl DatabaseClient {
    /// Builds the shared connection pool. Connections are established lazily
    /// so the service can start while MySQL is still unreachable; `/health`
    /// reports reachability separately.
    pub fn connect(database_url: &str) -> Result<Self, Error> {
        let pool = MySqlPoolOptions::new()
            .max_connections(10)
            .connect_lazy(database_url)
            .map_err(|e| anyhow!("Failed to configure database pool: {}", e))?;

        info!("MySQL connection pool initialized");

        Ok(Self { pool })
    }

    pub async fn ping(&self) -> Result<(), Error> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| anyhow!("Failed to acquire connection: {}", e))?;

        conn.ping()
            .await
            .map_err(|e| anyhow!("Database ping failed: {}", e))?;

        Ok(())
    }

    /// Idempotent schema bootstrap, safe to call on every write request and
    /// from concurrent requests. The existence check gates creation; the DDL
    /// itself uses IF NOT EXISTS so a concurrent bootstrap cannot error.
    pub async fn ensure_schema(&self) -> Result<(), ApiError> {
        let existing = sqlx::query(
            "SELECT table_name FROM information_schema.tables \
             WHERE table_schema = DATABASE() AND table_name = 'campaign'",
        )
        .fetch_optional(&self.pool)
        .await?;

        if existing.is_some() {
            return Ok(());
        }

        info!("Campaign schema not found, creating tables");

        sqlx::query(CREATE_PARENT_TABLE).execute(&self.pool).await?;

        for ddl in CREATE_CHILD_TABLES {
            sqlx::query(ddl).execute(&self.pool).await?;
        }

        Ok(())
    }

    /// Inserts the parent row and the variant's child row under a fresh id.
    ///
    /// The two inserts are separate non-transactional statements: if the
    /// child insert fails after the parent succeeds, an orphan parent row
    /// remains and reads of that id return not-found.
    pub async fn insert_campaign(
        &self,
        name: &str,
        details: &CampaignDetails,
    ) -> Result<String, ApiError> {
        let id = Uuid::new_v4().to_string();
        let campaign_type = details.campaign_type();

        let result = sqlx::query("INSERT INTO campaign (id, name, `type`) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(name)
            .bind(campaign_type.as_tag())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::Persistence);
        }

        let child_insert = match details {
            CampaignDetails::OnSite(d) => sqlx::query(
                "INSERT INTO campaign_onsite (id, placeholder, component, width, height) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&id)
            .bind(&d.placeholder)
            .bind(&d.component)
            .bind(&d.width)
            .bind(&d.height),
            CampaignDetails::Sms(d) => sqlx::query(
                "INSERT INTO campaign_sms (id, message, sender_name, sender_phone) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(&id)
            .bind(&d.message)
            .bind(&d.sender_name)
            .bind(&d.sender_phone),
            CampaignDetails::Email(d) => sqlx::query(
                "INSERT INTO campaign_email (id, message, sender_name, sender_email) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(&id)
            .bind(&d.message)
            .bind(&d.sender_name)
            .bind(&d.sender_email),
            CampaignDetails::Voice(d) => sqlx::query(
                "INSERT INTO campaign_voice (id, audio_name, caller_id) VALUES (?, ?, ?)",
            )
            .bind(&id)
            .bind(&d.audio_name)
            .bind(&d.caller_id),
            CampaignDetails::Push(d) => {
                sqlx::query("INSERT INTO campaign_push (id, message, sender) VALUES (?, ?, ?)")
                    .bind(&id)
                    .bind(&d.message)
                    .bind(&d.sender)
            }
        };

        let result = child_insert.execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::Persistence);
        }

        debug!(
            id = %id,
            campaign_type = %campaign_type,
            "Campaign rows written"
        );

        Ok(id)
    }

    /// Reconstructs a campaign by joining the parent row with its child
    /// table. An orphan parent (child row missing) is reported as not-found,
    /// same as a wholly unknown id.
    pub async fn fetch_campaign(&self, id: &str) -> Result<CampaignView, ApiError> {
        let parent = sqlx::query("SELECT `type` FROM campaign WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ApiError::NotFound)?;

        let tag: String = parent.try_get("type")?;
        let campaign_type = CampaignType::from_tag(&tag).ok_or(ApiError::NotFound)?;

        // Table name comes from the closed CampaignType enum, never from input.
        let join = format!(
            "SELECT c.name, ch.* FROM campaign c \
             JOIN {} ch ON ch.id = c.id WHERE c.id = ?",
            campaign_type.child_table()
        );

        let row = sqlx::query(&join)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ApiError::NotFound)?;

        let details = match campaign_type {
            CampaignType::OnSite => CampaignDetails::OnSite(OnSiteDetails {
                placeholder: row.try_get("placeholder")?,
                component: row.try_get("component")?,
                width: row.try_get("width")?,
                height: row.try_get("height")?,
            }),
            CampaignType::Sms => CampaignDetails::Sms(SmsDetails {
                message: row.try_get("message")?,
                sender_name: row.try_get("sender_name")?,
                sender_phone: row.try_get("sender_phone")?,
            }),
            CampaignType::Email => CampaignDetails::Email(EmailDetails {
                message: row.try_get("message")?,
                sender_name: row.try_get("sender_name")?,
                sender_email: row.try_get("sender_email")?,
            }),
            CampaignType::Voice => CampaignDetails::Voice(VoiceDetails {
                audio_name: row.try_get("audio_name")?,
                caller_id: row.try_get("caller_id")?,
            }),
            CampaignType::Push => CampaignDetails::Push(PushDetails {
                message: row.try_get("message")?,
                sender: row.try_get("sender")?,
            }),
        };

        Ok(CampaignView {
            id: id.to_string(),
            name: row.try_get("name")?,
            campaign_type,
            details,
        })
    }
}
