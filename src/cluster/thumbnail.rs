//! Representative thumbnail lookup for finished clusters
//!
//! Image caches belong to the caller and are passed in as an [`ImageProvider`];
//! clustering results are only read, never changed.

use std::collections::HashMap;
use std::hash::BuildHasher;

use super::point::Cluster;

/// Source of cached images keyed by thumbnail reference
pub trait ImageProvider {
    type Image;

    fn get(&self, key: &str) -> Option<Self::Image>;
}

impl<I: Clone, S: BuildHasher> ImageProvider for HashMap<String, I, S> {
    type Image = I;

    fn get(&self, key: &str) -> Option<I> {
        HashMap::get(self, key).cloned()
    }
}

/// Looks up the representative image of every cluster
///
/// Returns images keyed by cluster ID. Clusters without a thumbnail or whose
/// thumbnail is not available from `provider` are left out.
pub fn resolve_thumbnails<P: ImageProvider>(
    clusters: &[Cluster],
    provider: &P,
) -> HashMap<usize, P::Image> {
    clusters
        .iter()
        .filter_map(|cluster| {
            let key = cluster.thumbnail.as_deref()?;
            provider.get(key).map(|image| (cluster.c, image))
        })
        .collect()
}
