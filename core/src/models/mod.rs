//! Resource types shared by both API surfaces.
//!
//! # Design
//! Every resource carries its server-managed metadata as a named `sys:
//! Metadata` field; `HasMetadata` delegates the common accessors and
//! `Linkable` produces a `Link` to the resource. Resources only describe
//! data; writes send a borrowed payload view that leaves `sys` out of the
//! body.

pub mod api_key;
pub mod asset;
pub mod collection;
pub mod content_type;
pub mod entry;
pub mod locale;
pub mod space;
pub mod system;

pub use api_key::ApiKey;
pub use asset::{Asset, AssetDetails, AssetFields, AssetFile, FileUpload, ImageDetails, NewAsset, NewAssetFields};
pub use collection::{Collection, Pagination};
pub use content_type::{ContentType, Field, FieldType, FieldValidation, ImageDimensions, MinMax, Regexp};
pub use entry::{Entry, EntryCollection, EntryFields, Includes, NewEntry};
pub use locale::Locale;
pub use space::Space;
pub use system::{HasMetadata, Link, LinkData, Linkable, Metadata};
