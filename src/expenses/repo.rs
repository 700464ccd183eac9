use serde::{Deserialize, Serialize};
use sqlx::{types::Decimal, FromRow, PgPool, Postgres, QueryBuilder};
use time::Date;

use crate::expenses::dto::{ExpenseFields, ExpenseFilter};

/// Expense record in the database. Every query below is keyed on `user_id`,
/// so a caller can never observe or mutate another user's rows.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: Date,
}

impl Expense {
    pub async fn create(db: &PgPool, user_id: i64, fields: &ExpenseFields) -> anyhow::Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO expenses (user_id, amount, category, description, date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(fields.amount)
        .bind(&fields.category)
        .bind(&fields.description)
        .bind(fields.date)
        .fetch_one(db)
        .await?;
        Ok(id)
    }

    /// All of the caller's expenses matching the optional category and
    /// inclusive date-range filters, most recent first.
    pub async fn list_for_user(
        db: &PgPool,
        user_id: i64,
        filter: &ExpenseFilter,
    ) -> anyhow::Result<Vec<Expense>> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id, user_id, amount, category, description, date FROM expenses WHERE user_id = ",
        );
        qb.push_bind(user_id);
        if let Some(category) = filter.category() {
            qb.push(" AND category = ");
            qb.push_bind(category);
        }
        if let Some(from) = filter.from {
            qb.push(" AND date >= ");
            qb.push_bind(from);
        }
        if let Some(to) = filter.to {
            qb.push(" AND date <= ");
            qb.push_bind(to);
        }
        qb.push(" ORDER BY date DESC");

        let rows = qb.build_query_as::<Expense>().fetch_all(db).await?;
        Ok(rows)
    }

    /// Full replace of the four mutable fields, conditional on ownership in a
    /// single statement. Returns false when no row matched (absent or owned by
    /// someone else).
    pub async fn update_owned(
        db: &PgPool,
        user_id: i64,
        id: i64,
        fields: &ExpenseFields,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE expenses
            SET amount = $1, category = $2, description = $3, date = $4
            WHERE id = $5 AND user_id = $6
            "#,
        )
        .bind(fields.amount)
        .bind(&fields.category)
        .bind(&fields.description)
        .bind(fields.date)
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    /// Conditional delete keyed on both ids, same contract as `update_owned`.
    pub async fn delete_owned(db: &PgPool, user_id: i64, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            DELETE FROM expenses
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    /// Distinct categories used by the caller, alphabetically.
    pub async fn categories_for_user(db: &PgPool, user_id: i64) -> anyhow::Result<Vec<String>> {
        let categories = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT category
            FROM expenses
            WHERE user_id = $1
            ORDER BY category
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(categories)
    }
}
