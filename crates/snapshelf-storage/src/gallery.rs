//! Gallery listing

use crate::traits::{ObjectStore, StorageResult};

/// URLs of every object in the container, newest name first.
///
/// Names start with a `YYYYMMDDTHHMMSS` timestamp, so descending
/// lexicographic order approximates reverse upload order. The result is
/// neither filtered nor truncated.
pub async fn list_gallery(store: &dyn ObjectStore) -> StorageResult<Vec<String>> {
    let entries = store.list_objects().await?;
    Ok(gallery_urls(
        store.container_base_url(),
        entries.into_iter().map(|e| e.name),
    ))
}

fn gallery_urls(base_url: &str, names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut urls: Vec<String> = names
        .into_iter()
        .map(|name| format!("{}/{}", base_url, name))
        .collect();
    urls.sort_unstable_by(|a, b| b.cmp(a));
    urls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use bytes::Bytes;

    #[test]
    fn newest_name_first() {
        let urls = gallery_urls(
            "https://x/uploads",
            vec![
                "20240101T000000-a.png".to_string(),
                "20240102T000000-b.png".to_string(),
            ],
        );
        assert_eq!(
            urls,
            vec![
                "https://x/uploads/20240102T000000-b.png",
                "https://x/uploads/20240101T000000-a.png",
            ]
        );
    }

    #[test]
    fn empty_listing_gives_empty_gallery() {
        assert!(gallery_urls("https://x/uploads", Vec::new()).is_empty());
    }

    #[tokio::test]
    async fn lists_everything_in_the_store() {
        let store = MemoryStore::new("uploads", "http://localhost/uploads");
        for name in [
            "20240101T000000-a.png",
            "20240103T000000-c.png",
            "20240102T000000-b.png",
        ] {
            store
                .put_object(name, Bytes::from_static(b"x"), "image/png")
                .await
                .unwrap();
        }

        let gallery = list_gallery(&store).await.unwrap();
        assert_eq!(
            gallery,
            vec![
                "http://localhost/uploads/20240103T000000-c.png",
                "http://localhost/uploads/20240102T000000-b.png",
                "http://localhost/uploads/20240101T000000-a.png",
            ]
        );
    }
}
