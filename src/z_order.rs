//! Stacking order of open windows.
//!
//! A doubly linked list whose nodes live in an index arena, so prev/next are
//! plain slot indices instead of owning pointers. Head is the bottom of the
//! stack, tail the topmost (focused) window.

#[derive(Debug, Clone, Copy)]
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct ZOrderList<T: Copy + Eq> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T: Copy + Eq> Default for ZOrderList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Eq> ZOrderList<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<T> {
        self.head.and_then(|idx| self.node(idx)).map(|n| n.value)
    }

    /// Topmost window.
    pub fn tail(&self) -> Option<T> {
        self.tail.and_then(|idx| self.node(idx)).map(|n| n.value)
    }

    pub fn contains(&self, value: T) -> bool {
        self.find(value).is_some()
    }

    /// Append on top. A value already present is moved rather than duplicated.
    pub fn insert_at_tail(&mut self, value: T) {
        self.remove(value);
        let idx = self.alloc(Node {
            value,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(old) => self.link_next(old, Some(idx)),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.len += 1;
    }

    /// Insert at the bottom of the stack (background windows).
    pub fn insert_at_head(&mut self, value: T) {
        self.remove(value);
        let idx = self.alloc(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(old) => self.link_prev(old, Some(idx)),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
        self.len += 1;
    }

    /// Unlink `value`. Returns false when it was not in the list.
    pub fn remove(&mut self, value: T) -> bool {
        let Some(idx) = self.find(value) else {
            return false;
        };
        let Some(node) = self.slots.get_mut(idx).and_then(Option::take) else {
            return false;
        };
        match node.prev {
            Some(prev) => self.link_next(prev, node.next),
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.link_prev(next, node.prev),
            None => self.tail = node.prev,
        }
        self.free.push(idx);
        self.len -= 1;
        true
    }

    /// Move `value` to the top. Returns false if it already was the tail.
    pub fn move_to_tail(&mut self, value: T) -> bool {
        if self.tail() == Some(value) {
            return false;
        }
        self.insert_at_tail(value);
        true
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Bottom-to-top iteration.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    /// Owned bottom-to-top copy, safe to walk while the list is mutated.
    pub fn snapshot(&self) -> Vec<T> {
        self.iter().collect()
    }

    fn node(&self, idx: usize) -> Option<&Node<T>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn find(&self, value: T) -> Option<usize> {
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let node = self.node(idx)?;
            if node.value == value {
                return Some(idx);
            }
            cursor = node.next;
        }
        None
    }

    fn alloc(&mut self, node: Node<T>) -> usize {
        if let Some(idx) = self.free.pop()
            && let Some(slot) = self.slots.get_mut(idx)
        {
            *slot = Some(node);
            return idx;
        }
        self.slots.push(Some(node));
        self.slots.len() - 1
    }

    fn link_next(&mut self, idx: usize, next: Option<usize>) {
        if let Some(Some(node)) = self.slots.get_mut(idx) {
            node.next = next;
        }
    }

    fn link_prev(&mut self, idx: usize, prev: Option<usize>) {
        if let Some(Some(node)) = self.slots.get_mut(idx) {
            node.prev = prev;
        }
    }
}

pub struct Iter<'a, T: Copy + Eq> {
    list: &'a ZOrderList<T>,
    cursor: Option<usize>,
}

impl<T: Copy + Eq> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        Some(node.value)
    }
}

impl<'a, T: Copy + Eq> IntoIterator for &'a ZOrderList<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_is_last_inserted() {
        let mut list = ZOrderList::new();
        list.insert_at_tail(1);
        list.insert_at_tail(2);
        list.insert_at_tail(3);
        assert_eq!(list.tail(), Some(3));
        assert_eq!(list.head(), Some(1));
        assert_eq!(list.len(), 3);
        assert_eq!(list.snapshot(), vec![1, 2, 3]);
    }

    #[test]
    fn remove_relinks_middle_head_and_tail() {
        let mut list = ZOrderList::new();
        for v in 1..=4 {
            list.insert_at_tail(v);
        }
        assert!(list.remove(2));
        assert_eq!(list.snapshot(), vec![1, 3, 4]);
        assert!(list.remove(1));
        assert_eq!(list.head(), Some(3));
        assert!(list.remove(4));
        assert_eq!(list.tail(), Some(3));
        assert!(!list.remove(42));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn values_appear_at_most_once() {
        let mut list = ZOrderList::new();
        list.insert_at_tail(1);
        list.insert_at_tail(2);
        list.insert_at_tail(1);
        assert_eq!(list.snapshot(), vec![2, 1]);
        list.insert_at_head(1);
        assert_eq!(list.snapshot(), vec![1, 2]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn move_to_tail_is_noop_for_current_tail() {
        let mut list = ZOrderList::new();
        list.insert_at_tail('a');
        list.insert_at_tail('b');
        assert!(!list.move_to_tail('b'));
        assert_eq!(list.snapshot(), vec!['a', 'b']);
        assert!(list.move_to_tail('a'));
        assert_eq!(list.snapshot(), vec!['b', 'a']);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut list = ZOrderList::new();
        for v in 0..8 {
            list.insert_at_tail(v);
        }
        for v in 0..8 {
            list.move_to_tail(v);
        }
        assert_eq!(list.slots.len(), 8);
        assert_eq!(list.snapshot(), (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn snapshot_survives_mutation_while_walking() {
        let mut list = ZOrderList::new();
        for v in 0..5 {
            list.insert_at_tail(v);
        }
        for v in list.snapshot() {
            if v % 2 == 0 {
                list.remove(v);
            }
        }
        assert_eq!(list.snapshot(), vec![1, 3]);
    }
}
