use folio_types::{AssetRef, ImageAsset};
use std::collections::HashMap;

/// Images used by a page, in first-use order. One entry per distinct reference.
#[derive(Debug, Clone, Default)]
pub struct ImageTable {
    entries: Vec<(AssetRef, ImageAsset)>,
    index: HashMap<AssetRef, usize>,
}

impl ImageTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, reference: AssetRef, asset: ImageAsset) -> usize {
        if let Some(&i) = self.index.get(&reference) {
            return i;
        }
        self.entries.push((reference.clone(), asset));
        self.index.insert(reference, self.entries.len() - 1);
        self.entries.len() - 1
    }

    pub fn get(&self, reference: &AssetRef) -> Option<&ImageAsset> {
        self.index.get(reference).map(|&i| &self.entries[i].1)
    }

    pub fn index_of(&self, reference: &AssetRef) -> Option<usize> {
        self.index.get(reference).copied()
    }

    pub fn contains(&self, reference: &AssetRef) -> bool {
        self.index.contains_key(reference)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AssetRef, &ImageAsset)> {
        self.entries.iter().map(|(r, a)| (r, a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
