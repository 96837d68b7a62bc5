use std::{fmt, iter::FusedIterator, marker::PhantomData, ptr::NonNull};

/// A single link in the chain
struct Node<T> {
    /// The stored element
    value: T,
    /// Successor. The chain is owned front to back through these links.
    next: Option<NonNull<Node<T>>>,
    /// Predecessor, a non-owning back-reference used for backward traversal
    prev: Option<NonNull<Node<T>>>,
}

impl<T> Node<T> {
    /// Recursive lookup: the value `steps` links after this node
    fn value_at(&self, steps: usize) -> Option<&T> {
        match steps.checked_sub(1) {
            None => Some(&self.value),
            Some(rest) => {
                // SAFETY: every `next` link points at a live node of the same deque,
                // which is borrowed for at least as long as `self`
                let next = unsafe { self.next?.as_ref() };
                next.value_at(rest)
            }
        }
    }
}

/// A double-ended queue backed by a doubly linked list.
///
/// Both ends are reachable in O(1): `head` owns the chain and `tail` is a
/// non-owning pointer to its last node. Positional lookups walk the chain
/// from the front.
///
/// The deque owns its elements, so it can move between threads whenever
/// `T` can. It has no interior mutability of its own.
pub struct LinkedDeque<T> {
    /// First node; owns the whole chain
    head: Option<NonNull<Node<T>>>,
    /// Last node, borrowed from the chain
    tail: Option<NonNull<Node<T>>>,
    /// Number of nodes in the chain
    len: usize,
    /// Tells the drop checker that nodes are owned
    _owns: PhantomData<Box<Node<T>>>,
}

impl<T> LinkedDeque<T> {
    /// Creates an empty deque
    #[must_use]
    pub const fn new() -> Self {
        Self { head: None, tail: None, len: 0, _owns: PhantomData }
    }

    /// Inserts a value at the front
    pub fn add_first(&mut self, value: T) {
        let node = NonNull::from(Box::leak(Box::new(Node { value, next: self.head, prev: None })));
        match self.head {
            // SAFETY: `head` is a live node owned by this deque
            Some(old_head) => unsafe { (*old_head.as_ptr()).prev = Some(node) },
            None => self.tail = Some(node),
        }
        self.head = Some(node);
        self.len = self.len.saturating_add(1);
    }

    /// Inserts a value at the back
    pub fn add_last(&mut self, value: T) {
        let node = NonNull::from(Box::leak(Box::new(Node { value, next: None, prev: self.tail })));
        match self.tail {
            // SAFETY: `tail` is a live node owned by this deque
            Some(old_tail) => unsafe { (*old_tail.as_ptr()).next = Some(node) },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len = self.len.saturating_add(1);
    }

    /// Removes and returns the front value, or `None` if the deque is empty
    pub fn remove_first(&mut self) -> Option<T> {
        let head = self.head?;
        // SAFETY: `head` was leaked from a `Box` in `add_*` and is unlinked
        // below before anything can reach it again
        let node = unsafe { Box::from_raw(head.as_ptr()) };
        self.head = node.next;
        match self.head {
            // SAFETY: the new head is a live node owned by this deque
            Some(new_head) => unsafe { (*new_head.as_ptr()).prev = None },
            None => self.tail = None,
        }
        self.len = self.len.saturating_sub(1);
        Some(node.value)
    }

    /// Removes and returns the back value, or `None` if the deque is empty
    pub fn remove_last(&mut self) -> Option<T> {
        let tail = self.tail?;
        // SAFETY: `tail` was leaked from a `Box` in `add_*` and is unlinked
        // below before anything can reach it again
        let node = unsafe { Box::from_raw(tail.as_ptr()) };
        self.tail = node.prev;
        match self.tail {
            // SAFETY: the new tail is a live node owned by this deque
            Some(new_tail) => unsafe { (*new_tail.as_ptr()).next = None },
            None => self.head = None,
        }
        self.len = self.len.saturating_sub(1);
        Some(node.value)
    }

    /// Returns the element at `index`, walking forward from the front.
    ///
    /// `None` if `index` is out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.iter().nth(index)
    }

    /// Same result as [`get`](Self::get), computed by recursing once per link.
    ///
    /// Recursion depth equals `index`, so indices in the hundreds of
    /// thousands can exhaust the thread's stack. Prefer `get` for long deques.
    #[must_use]
    pub fn get_recursive(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        // SAFETY: `head` is a live node owned by this deque, borrowed via `&self`
        let head = unsafe { self.head?.as_ref() };
        head.value_at(index)
    }

    /// Returns the front value without removing it
    #[must_use]
    pub fn peek_first(&self) -> Option<&T> {
        // SAFETY: `head` is a live node owned by this deque, borrowed via `&self`
        self.head.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Returns the back value without removing it
    #[must_use]
    pub fn peek_last(&self) -> Option<&T> {
        // SAFETY: `tail` is a live node owned by this deque, borrowed via `&self`
        self.tail.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Returns the number of elements in the deque
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Alias of [`len`](Self::len)
    #[must_use]
    pub const fn size(&self) -> usize {
        self.len
    }

    /// Returns true if the deque holds no elements
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every element
    pub fn clear(&mut self) {
        while self.remove_first().is_some() {}
    }

    /// Returns a front-to-back iterator over the elements
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { head: self.head, tail: self.tail, remaining: self.len, _marker: PhantomData }
    }
}

impl<T> Drop for LinkedDeque<T> {
    fn drop(&mut self) {
        // Unlinking one node at a time keeps long chains from recursing
        self.clear();
    }
}

// SAFETY: the deque uniquely owns every node; sending it sends the `T`s
unsafe impl<T: Send> Send for LinkedDeque<T> {}

// SAFETY: shared access only hands out `&T`
unsafe impl<T: Sync> Sync for LinkedDeque<T> {}

impl<T> Default for LinkedDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedDeque<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for LinkedDeque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedDeque<T> {}

impl<T: fmt::Debug> fmt::Debug for LinkedDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for LinkedDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add_last(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<'a, T> IntoIterator for &'a LinkedDeque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for LinkedDeque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { deque: self }
    }
}

/// Borrowing iterator over a [`LinkedDeque`]
pub struct Iter<'a, T> {
    /// Next node from the front
    head: Option<NonNull<Node<T>>>,
    /// Next node from the back
    tail: Option<NonNull<Node<T>>>,
    /// Elements not yet yielded from either end
    remaining: usize,
    /// Ties the iterator to the borrowed deque
    _marker: PhantomData<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: the deque is borrowed for 'a, so its nodes stay alive and unmodified
        let node: &'a Node<T> = unsafe { self.head?.as_ref() };
        self.head = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: the deque outlives the iterator, so its nodes stay alive and unmodified
        let node = unsafe { self.tail?.as_ref() };
        self.tail = node.prev;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

// SAFETY: the iterator behaves like a `&LinkedDeque<T>`
unsafe impl<T: Sync> Send for Iter<'_, T> {}

// SAFETY: as above
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { head: self.head, tail: self.tail, remaining: self.remaining, _marker: PhantomData }
    }
}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.remaining).finish_non_exhaustive()
    }
}

/// Owning iterator over a [`LinkedDeque`]
#[derive(Debug)]
pub struct IntoIter<T> {
    /// The deque being drained
    deque: LinkedDeque<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.deque.remove_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len(), Some(self.deque.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.deque.remove_last()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
