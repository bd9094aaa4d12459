use rand::Rng;

/// A permutation of a lesson's item indices plus a cursor into it.
///
/// The cursor ranges over `0..=len`; `cursor == len` means the order is
/// exhausted. The permutation is only ever replaced wholesale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraversalOrder {
    order: Vec<usize>,
    cursor: usize,
}

impl TraversalOrder {
    /// `0, 1, ..., len - 1` in lesson order.
    pub fn identity(len: usize) -> Self {
        Self {
            order: (0..len).collect(),
            cursor: 0,
        }
    }

    /// A uniformly random permutation of `0..len`.
    pub fn shuffled<R: Rng>(len: usize, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..len).collect();
        fisher_yates(&mut order, rng);
        Self { order, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.order.len()
    }

    /// Lesson index under the cursor, or `None` once exhausted.
    pub fn current(&self) -> Option<usize> {
        self.order.get(self.cursor).copied()
    }

    /// Moves the cursor forward, stopping at the exhausted position.
    pub fn advance(&mut self) {
        self.cursor = (self.cursor + 1).min(self.order.len());
    }

    /// Moves the cursor to `cursor`, clamped to `0..=len`.
    pub fn seek(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.order.len());
    }

    pub fn indices(&self) -> &[usize] {
        &self.order
    }
}

/// In-place Fisher-Yates shuffle.
pub fn fisher_yates<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn is_permutation(order: &[usize]) -> bool {
        let mut sorted = order.to_vec();
        sorted.sort_unstable();
        sorted == (0..order.len()).collect::<Vec<_>>()
    }

    #[test]
    fn test_shuffle_is_always_a_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for len in 0..40 {
            let order = TraversalOrder::shuffled(len, &mut rng);
            assert_eq!(order.len(), len);
            assert!(is_permutation(order.indices()), "len {len}: {order:?}");
            assert_eq!(order.cursor(), 0);
        }
    }

    #[test]
    fn test_same_seed_same_order() {
        let a = TraversalOrder::shuffled(25, &mut ChaCha8Rng::seed_from_u64(42));
        let b = TraversalOrder::shuffled(25, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_reaches_every_position() {
        // Over many shuffles of three items, each item lands in each slot.
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut seen = [[false; 3]; 3];
        for _ in 0..200 {
            let order = TraversalOrder::shuffled(3, &mut rng);
            for (slot, &item) in order.indices().iter().enumerate() {
                seen[item][slot] = true;
            }
        }
        assert!(seen.iter().flatten().all(|s| *s));
    }

    #[test]
    fn test_empty_order_is_immediately_exhausted() {
        let order = TraversalOrder::identity(0);
        assert!(order.is_exhausted());
        assert_eq!(order.current(), None);
    }

    #[test]
    fn test_cursor_stops_at_exhaustion() {
        let mut order = TraversalOrder::identity(2);
        assert_eq!(order.current(), Some(0));
        order.advance();
        assert_eq!(order.current(), Some(1));
        order.advance();
        assert!(order.is_exhausted());
        order.advance();
        assert_eq!(order.cursor(), 2);
        order.seek(10);
        assert_eq!(order.cursor(), 2);
    }
}
