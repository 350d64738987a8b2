use chrono::Utc;
use sea_orm::sea_query::{Expr, ExprTrait, LikeExpr};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, Select,
};

use super::base_traits::{AuditableEntity, TimestampedActiveModel};
use super::error::{DaoLayerError, DaoResult};

pub type ModelOf<D> = <<D as DaoBase>::Entity as EntityTrait>::Model;

const LIKE_ESCAPE: char = '\\';

/// `%needle%` with LIKE metacharacters escaped by [`LIKE_ESCAPE`].
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

pub fn contains<C>(column: C, needle: &str) -> Condition
where
    C: ColumnTrait,
{
    Condition::all()
        .add(Expr::col(column).like(LikeExpr::new(contains_pattern(needle)).escape(LIKE_ESCAPE)))
}

#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized {
    type Entity: AuditableEntity + Send + Sync;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + TimestampedActiveModel
        + Send
        + Sync
        + 'static;

    /// Human-readable entity name used in not-found errors.
    const ENTITY: &'static str;

    fn from_db(db: DatabaseConnection) -> Self;

    fn new(db: &DatabaseConnection) -> Self {
        Self::from_db(db.clone())
    }

    fn db(&self) -> &DatabaseConnection;

    fn not_found(id: i32) -> DaoLayerError {
        DaoLayerError::NotFound {
            entity: Self::ENTITY,
            id,
        }
    }

    async fn create(&self, data: Self::ActiveModel) -> DaoResult<ModelOf<Self>>
    where
        ModelOf<Self>: IntoActiveModel<Self::ActiveModel>,
    {
        let now = Utc::now().fixed_offset();
        let mut active = data;
        active.set_created_at(now);
        active.set_updated_at(now);
        Ok(active.insert(self.db()).await?)
    }

    async fn find_optional(&self, id: i32) -> DaoResult<Option<ModelOf<Self>>> {
        Ok(Self::Entity::find()
            .filter(Self::Entity::id_column().eq(id))
            .one(self.db())
            .await?)
    }

    async fn find_by_id(&self, id: i32) -> DaoResult<ModelOf<Self>> {
        self.find_optional(id)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn exists(&self, id: i32) -> DaoResult<bool> {
        Ok(self.find_optional(id).await?.is_some())
    }

    async fn find_one(
        &self,
        apply: impl FnOnce(Select<Self::Entity>) -> Select<Self::Entity> + Send,
    ) -> DaoResult<Option<ModelOf<Self>>> {
        Ok(apply(Self::Entity::find()).one(self.db()).await?)
    }

    /// Rows matching `apply`, in insertion order unless `apply` orders first.
    async fn find_all(
        &self,
        apply: impl FnOnce(Select<Self::Entity>) -> Select<Self::Entity> + Send,
    ) -> DaoResult<Vec<ModelOf<Self>>> {
        Ok(apply(Self::Entity::find())
            .order_by_asc(Self::Entity::id_column())
            .all(self.db())
            .await?)
    }

    /// The `limit` most recently created rows matching `apply`.
    async fn find_latest(
        &self,
        limit: u64,
        apply: impl FnOnce(Select<Self::Entity>) -> Select<Self::Entity> + Send,
    ) -> DaoResult<Vec<ModelOf<Self>>> {
        Ok(apply(Self::Entity::find())
            .order_by_desc(Self::Entity::created_at_column())
            .order_by_desc(Self::Entity::id_column())
            .limit(limit)
            .all(self.db())
            .await?)
    }

    async fn update_model<F>(&self, model: ModelOf<Self>, apply: F) -> DaoResult<ModelOf<Self>>
    where
        F: FnOnce(&mut Self::ActiveModel) + Send,
        ModelOf<Self>: IntoActiveModel<Self::ActiveModel>,
    {
        let mut active = model.into_active_model();
        apply(&mut active);
        active.set_updated_at(Utc::now().fixed_offset());
        Ok(active.update(self.db()).await?)
    }

    async fn update<F>(&self, id: i32, apply: F) -> DaoResult<ModelOf<Self>>
    where
        F: FnOnce(&mut Self::ActiveModel) + Send,
        ModelOf<Self>: IntoActiveModel<Self::ActiveModel>,
    {
        let model = self.find_by_id(id).await?;
        self.update_model(model, apply).await
    }

    async fn delete(&self, id: i32) -> DaoResult<i32> {
        let result = Self::Entity::delete_many()
            .filter(Self::Entity::id_column().eq(id))
            .exec(self.db())
            .await?;

        if result.rows_affected == 0 {
            return Err(Self::not_found(id));
        }

        Ok(id)
    }
}
