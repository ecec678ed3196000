use tracing::warn;

use crate::layer::{Layer, LayerCid, LayerId};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct AddOptions {
    /// Insert position; `None` appends. Positions past the end append.
    pub at: Option<usize>,
}

impl AddOptions {
    pub fn at(index: usize) -> Self {
        Self { at: Some(index) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    Duplicate(LayerCid),
}

impl std::fmt::Display for CollectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectionError::Duplicate(cid) => {
                write!(f, "layer {cid} is already in the collection")
            }
        }
    }
}

impl std::error::Error for CollectionError {}

/// Ordered layer stack; index 0 is the base layer.
///
/// Every membership change reassigns `order` on all members so that
/// `layer.order() == index`. Reassignment is silent: the collection has no
/// notifications of its own, the owning map reports membership changes.
#[derive(Debug, Default)]
pub struct LayerCollection {
    layers: Vec<Layer>,
}

impl LayerCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.layers.iter()
    }

    pub fn at(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn base(&self) -> Option<&Layer> {
        self.layers.first()
    }

    pub fn position(&self, cid: LayerCid) -> Option<usize> {
        self.layers.iter().position(|l| l.cid() == cid)
    }

    pub fn contains(&self, cid: LayerCid) -> bool {
        self.position(cid).is_some()
    }

    pub fn get(&self, cid: LayerCid) -> Option<&Layer> {
        self.layers.iter().find(|l| l.cid() == cid)
    }

    /// Mutable access for attribute edits; order stays owned by the
    /// collection.
    pub fn get_mut(&mut self, cid: LayerCid) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.cid() == cid)
    }

    pub fn find_by_id(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id.as_ref() == Some(id))
    }

    /// Returns the index the layer landed at.
    pub fn add(&mut self, layer: Layer, opts: AddOptions) -> Result<usize, CollectionError> {
        if self.contains(layer.cid()) {
            return Err(CollectionError::Duplicate(layer.cid()));
        }
        let index = opts.at.unwrap_or(self.layers.len()).min(self.layers.len());
        self.layers.insert(index, layer);
        self.reassign_order();
        Ok(index)
    }

    pub fn remove(&mut self, cid: LayerCid) -> Option<Layer> {
        let index = self.position(cid)?;
        self.remove_at(index)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Layer> {
        if index >= self.layers.len() {
            return None;
        }
        let layer = self.layers.remove(index);
        self.reassign_order();
        Some(layer)
    }

    /// Replaces the whole stack, returning the previous members.
    ///
    /// Later duplicates of a client id are dropped.
    pub fn reset(&mut self, layers: Vec<Layer>) -> Vec<Layer> {
        let previous = std::mem::take(&mut self.layers);
        for layer in layers {
            if self.contains(layer.cid()) {
                warn!(cid = %layer.cid(), "dropping duplicate layer on reset");
                continue;
            }
            self.layers.push(layer);
        }
        self.reassign_order();
        previous
    }

    pub fn drain(&mut self) -> Vec<Layer> {
        std::mem::take(&mut self.layers)
    }

    fn reassign_order(&mut self) {
        for (i, layer) in self.layers.iter_mut().enumerate() {
            layer.set_order(i);
        }
    }
}

/// Deep copy with fresh client ids and no persisted ids.
impl Clone for LayerCollection {
    fn clone(&self) -> Self {
        let mut out = LayerCollection::new();
        out.layers = self.layers.iter().map(Layer::detached).collect();
        out.reassign_order();
        out
    }
}

impl<'a> IntoIterator for &'a LayerCollection {
    type Item = &'a Layer;
    type IntoIter = std::slice::Iter<'a, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{AddOptions, CollectionError, LayerCollection};
    use crate::layer::{Layer, LayerId};
    use proptest::prelude::*;

    fn assert_dense_order(c: &LayerCollection) {
        for (i, layer) in c.iter().enumerate() {
            assert_eq!(layer.order(), i, "layer {} out of order", layer.cid());
        }
    }

    #[test]
    fn add_appends_and_assigns_order() {
        let mut c = LayerCollection::new();
        assert_eq!(c.add(Layer::tiled("a"), AddOptions::default()), Ok(0));
        assert_eq!(c.add(Layer::tiled("b"), AddOptions::default()), Ok(1));
        assert_eq!(c.add(Layer::tiled("c"), AddOptions::at(0)), Ok(0));
        let templates: Vec<_> = c.iter().filter_map(|l| l.url_template()).collect();
        assert_eq!(templates, vec!["c", "a", "b"]);
        assert_dense_order(&c);
    }

    #[test]
    fn insert_past_end_appends() {
        let mut c = LayerCollection::new();
        c.add(Layer::tiled("a"), AddOptions::default()).unwrap();
        assert_eq!(c.add(Layer::tiled("b"), AddOptions::at(10)), Ok(1));
    }

    #[test]
    fn rejects_duplicate_identity() {
        let mut c = LayerCollection::new();
        let layer = Layer::tiled("a");
        let copy = layer.clone();
        c.add(layer, AddOptions::default()).unwrap();
        assert_eq!(
            c.add(copy.clone(), AddOptions::default()),
            Err(CollectionError::Duplicate(copy.cid()))
        );
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn remove_reindexes_remaining() {
        let mut c = LayerCollection::new();
        let a = Layer::tiled("a");
        let a_cid = a.cid();
        c.add(a, AddOptions::default()).unwrap();
        c.add(Layer::tiled("b"), AddOptions::default()).unwrap();
        c.add(Layer::tiled("c"), AddOptions::default()).unwrap();

        let removed = c.remove(a_cid).unwrap();
        assert_eq!(removed.url_template(), Some("a"));
        assert!(c.remove(a_cid).is_none());
        assert_eq!(c.base().and_then(|l| l.url_template()), Some("b"));
        assert_dense_order(&c);
        assert!(c.remove_at(5).is_none());
    }

    #[test]
    fn find_by_persisted_id() {
        let mut c = LayerCollection::new();
        c.add(Layer::tiled("a").with_id("7"), AddOptions::default())
            .unwrap();
        assert!(c.find_by_id(&LayerId::new("7")).is_some());
        assert!(c.find_by_id(&LayerId::new("8")).is_none());
    }

    #[test]
    fn clone_strips_identity_and_keeps_attributes() {
        let mut c = LayerCollection::new();
        c.add(Layer::tiled("a").with_id("1"), AddOptions::default())
            .unwrap();
        c.add(Layer::plain("#000"), AddOptions::default()).unwrap();

        let copy = c.clone();
        assert_eq!(copy.len(), 2);
        for (orig, dup) in c.iter().zip(copy.iter()) {
            assert_ne!(orig.cid(), dup.cid());
            assert!(dup.id.is_none());
            assert_eq!(orig.kind, dup.kind);
            assert_eq!(orig.order(), dup.order());
        }
    }

    #[test]
    fn reset_drops_duplicates() {
        let mut c = LayerCollection::new();
        c.add(Layer::tiled("old"), AddOptions::default()).unwrap();
        let a = Layer::tiled("a");
        let previous = c.reset(vec![a.clone(), a, Layer::tiled("b")]);
        assert_eq!(previous.len(), 1);
        assert_eq!(c.len(), 2);
        assert_dense_order(&c);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(Option<usize>),
        Remove(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            proptest::option::of(0usize..8).prop_map(Op::Add),
            (0usize..8).prop_map(Op::Remove),
        ]
    }

    proptest! {
        /// Property: order always equals index after any add/remove sequence.
        #[test]
        fn prop_order_matches_index(ops in proptest::collection::vec(op(), 0..64)) {
            let mut c = LayerCollection::new();
            for op in ops {
                match op {
                    Op::Add(at) => {
                        c.add(Layer::tiled("t"), AddOptions { at }).unwrap();
                    }
                    Op::Remove(i) => {
                        if let Some(cid) = c.at(i).map(|l| l.cid()) {
                            prop_assert!(c.remove(cid).is_some());
                        }
                    }
                }
                for (i, layer) in c.iter().enumerate() {
                    prop_assert_eq!(layer.order(), i);
                }
            }
        }
    }
}
