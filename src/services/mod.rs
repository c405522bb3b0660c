pub mod algolia;
pub mod importer;
pub mod transform;
pub mod youtube;
