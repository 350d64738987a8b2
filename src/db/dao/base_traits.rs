pub trait AuditableEntity: sea_orm::EntityTrait {
    fn id_column() -> Self::Column;
    fn created_at_column() -> Self::Column;
}

pub trait TimestampedActiveModel {
    fn set_created_at(&mut self, ts: sea_orm::entity::prelude::DateTimeWithTimeZone);
    fn set_updated_at(&mut self, ts: sea_orm::entity::prelude::DateTimeWithTimeZone);
}
