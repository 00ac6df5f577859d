use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::contact::{Contact, ContactInsert, ContactListFilter},
    errors::AppError,
    repositories::sqlx_repo::SqlxContactRepo,
};

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create_contact(&self, contact: &ContactInsert) -> Result<Contact, AppError>;
    async fn get_contact_by_id(&self, id: &Uuid) -> Result<Option<Contact>, AppError>;
    /// Newest first.
    async fn list_contacts(&self, filter: &ContactListFilter) -> Result<Vec<Contact>, AppError>;
    async fn set_replied(&self, ids: &[Uuid], replied: bool) -> Result<u64, AppError>;
    async fn delete_contact(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxContactRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxContactRepo { pool }
    }
}

#[async_trait]
impl ContactRepository for SqlxContactRepo {
    async fn create_contact(&self, contact: &ContactInsert) -> Result<Contact, AppError> {
        let created = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (name, email, subject, message, newsletter)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(contact.subject)
        .bind(&contact.message)
        .bind(contact.newsletter)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_contact_by_id(&self, id: &Uuid) -> Result<Option<Contact>, AppError> {
        let contact = sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(contact)
    }

    async fn list_contacts(&self, filter: &ContactListFilter) -> Result<Vec<Contact>, AppError> {
        let mut builder = QueryBuilder::new("SELECT * FROM contacts WHERE TRUE");

        if let Some(subject) = filter.subject {
            builder.push(" AND subject = ").push_bind(subject);
        }
        if let Some(replied) = filter.replied {
            builder.push(" AND replied = ").push_bind(replied);
        }
        if let Some(newsletter) = filter.newsletter {
            builder.push(" AND newsletter = ").push_bind(newsletter);
        }
        if let Some(term) = filter.search_term() {
            let pattern = format!("%{}%", term);
            builder.push(" AND (name ILIKE ").push_bind(pattern.clone());
            builder.push(" OR email ILIKE ").push_bind(pattern.clone());
            builder.push(" OR message ILIKE ").push_bind(pattern);
            builder.push(")");
        }
        builder.push(" ORDER BY created_at DESC");

        let contacts = builder.build_query_as::<Contact>().fetch_all(&self.pool).await?;
        Ok(contacts)
    }

    async fn set_replied(&self, ids: &[Uuid], replied: bool) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE contacts SET replied = $1 WHERE id = ANY($2)")
            .bind(replied)
            .bind(ids)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_contact(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Contact not found".into()));
        }

        Ok(())
    }
}
