//! MySQL user backend

use async_trait::async_trait;
use config::AppConfig;
use metrics_system::Context;
use query_builder::Action;
use sqlx::mysql::MySqlRow;
use sqlx::Row;

use super::DataAccess;
use crate::client::StorageClient;
use crate::domain::{User, UserField, UserPages};
use crate::errors::{DaoError, ErrorCode};
use crate::executor::{exec_query, exec_statement, exec_statement_with_tx};
use crate::filters::Filters;
use crate::statements::{self, USERS_TABLE};

const TOTAL_COLUMN: &str = "total";

/// MySQL-backed user storage
#[derive(Debug, Clone)]
pub struct UserStorage {
    client: StorageClient,
    default_page_size: i64,
}

impl UserStorage {
    pub fn new(client: StorageClient, default_page_size: i64) -> Self {
        Self {
            client,
            default_page_size,
        }
    }

    pub async fn connect(config: &AppConfig) -> Result<Self, DaoError> {
        let client = StorageClient::connect(&config.database).await?;
        Ok(Self::new(client, config.query.default_page_size))
    }

    pub fn client(&self) -> &StorageClient {
        &self.client
    }

    fn read_user(row: &MySqlRow, fields: &[UserField]) -> Result<User, sqlx::Error> {
        let mut user = User::default();
        for field in fields {
            match field {
                UserField::Id => user.id = row.try_get(field.as_str())?,
                UserField::Name => user.name = row.try_get(field.as_str())?,
                UserField::Age => user.age = row.try_get(field.as_str())?,
            }
        }
        Ok(user)
    }
}

#[async_trait]
impl DataAccess for UserStorage {
    async fn search(&self, ctx: &Context, filters: Filters) -> Result<UserPages, DaoError> {
        let fields = UserField::projected(&filters.fields).map_err(|column| {
            DaoError::errorf(
                ErrorCode::ClientSide,
                format!("unknown user field: {}", column),
            )
        })?;

        let (sql, args) = statements::search_statement(&filters, self.default_page_size)?;
        let rows = exec_query(ctx, &self.client, USERS_TABLE, &sql, &args).await?;

        let total: i64 = match rows.first() {
            Some(row) => row.try_get(TOTAL_COLUMN)?,
            None => 0,
        };
        let users = rows
            .iter()
            .map(|row| Self::read_user(row, &fields))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(UserPages {
            limit: statements::page_size(&filters, self.default_page_size),
            offset: filters.offset,
            total,
            users,
        })
    }

    async fn create(&self, ctx: &Context, user: User) -> Result<(), DaoError> {
        let (sql, args) = statements::insert_statement(&user);

        let mut tx = self.client.begin_tx().await?;
        exec_statement_with_tx(ctx, Action::Insert, &mut tx, USERS_TABLE, &sql, &args).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn update(&self, ctx: &Context, user: User) -> Result<(), DaoError> {
        let (sql, args) = statements::update_statement(&user)?;
        let result =
            exec_statement(ctx, &self.client, Action::Update, USERS_TABLE, &sql, &args).await?;

        if result.rows_affected() == 0 {
            return Err(DaoError::errorf(
                ErrorCode::NotFound,
                format!("user {} not found", user.id),
            ));
        }
        Ok(())
    }
}
