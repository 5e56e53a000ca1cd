//! Operations shared by every `object_store`-backed implementation.

use bytes::Bytes;
use futures::{StreamExt, TryStreamExt};
use object_store::path::Path;
use object_store::{
    Attribute, AttributeValue, Attributes, ObjectMeta, ObjectStoreExt as _, PutOptions, PutPayload,
    Result as ObjectResult,
};
use snapshelf_core::models::ObjectEntry;

/// Upload with the given `Content-Type`, overwriting any existing object.
pub(crate) async fn put_with_content_type(
    store: &dyn object_store::ObjectStore,
    name: &str,
    bytes: Bytes,
    content_type: &str,
) -> ObjectResult<()> {
    let mut attributes = Attributes::new();
    attributes.insert(
        Attribute::ContentType,
        AttributeValue::from(content_type.to_string()),
    );

    let opts = PutOptions {
        attributes,
        ..Default::default()
    };

    store
        .put_opts(&Path::from(name), PutPayload::from(bytes), opts)
        .await
        .map(|_| ())
}

/// List the container, stopping after `limit` entries when given.
pub(crate) async fn list_entries(
    store: &dyn object_store::ObjectStore,
    limit: Option<usize>,
) -> ObjectResult<Vec<ObjectEntry>> {
    let stream = store.list(None);
    let metas: Vec<ObjectMeta> = match limit {
        Some(n) => stream.take(n).try_collect().await?,
        None => stream.try_collect().await?,
    };

    Ok(metas.into_iter().map(to_entry).collect())
}

pub(crate) async fn read_bytes(
    store: &dyn object_store::ObjectStore,
    name: &str,
) -> ObjectResult<Bytes> {
    store.get(&Path::from(name)).await?.bytes().await
}

fn to_entry(meta: ObjectMeta) -> ObjectEntry {
    ObjectEntry {
        name: meta.location.to_string(),
        size_bytes: meta.size as u64,
        last_modified: Some(meta.last_modified),
    }
}
