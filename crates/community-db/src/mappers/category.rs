//! Category model -> entity

use community_core::{Category, FileRef, RecordId};

use crate::models::CategoryModel;

impl From<CategoryModel> for Category {
    fn from(model: CategoryModel) -> Self {
        Category {
            id: RecordId::new(model.id),
            name: model.name,
            description: model.description,
            icon: model.icon.map(FileRef::new),
        }
    }
}
