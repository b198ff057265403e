//! Relation model -> entity mapper

use blog_core::entities::Relation;
use blog_core::value_objects::RecordState;

use crate::models::RelationModel;

impl RelationModel {
    /// Type the raw pair with the relation's id types
    pub fn into_relation<S, T>(self) -> Relation<S, T>
    where
        S: From<i64>,
        T: From<i64>,
    {
        Relation {
            subject: S::from(self.subject_id),
            target: T::from(self.target_id),
            created_at: self.created_at,
            state: RecordState::from_deleted_at(self.deleted_at),
        }
    }
}
