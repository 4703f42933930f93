use std::fmt;
use std::mem;
use std::ptr;

/// A node in the doubly linked list.
///
/// Contains a value and pointers to the previous and next entries.
/// This structure is not meant to be used directly by users of the `List`.
pub(crate) struct Entry<T> {
    /// The value stored in this entry. Uses MaybeUninit to allow for sigil nodes.
    val: mem::MaybeUninit<T>,
    /// Pointer to the previous entry in the list.
    prev: *mut Entry<T>,
    /// Pointer to the next entry in the list.
    next: *mut Entry<T>,
}

impl<T> Entry<T> {
    /// Creates a new entry with the given value.
    fn new(val: T) -> Self {
        Entry {
            val: mem::MaybeUninit::new(val),
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
        }
    }

    /// Creates a new sigil (sentinel) entry without initializing the value.
    ///
    /// Sigil entries are used as head and tail markers in the list.
    fn new_sigil() -> Self {
        Entry {
            val: mem::MaybeUninit::uninit(),
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
        }
    }
}

/// An unbounded doubly linked list ordered from most to least recently added.
///
/// The list provides O(1) insertion at the front, O(1) promotion of an
/// arbitrary node back to the front, and O(1) removal from either end. It
/// uses sentinel nodes (sigils) at the head and tail to simplify pointer
/// surgery. Callers that need random access keep the raw node pointer
/// returned by [`push_front`](List::push_front) and index it externally.
///
/// Capacity policy is deliberately not part of this structure; the owner
/// decides when to pop the tail.
pub(crate) struct List<T> {
    /// Current number of items in the list.
    len: usize,
    /// Pointer to the head sentinel node.
    head: *mut Entry<T>,
    /// Pointer to the tail sentinel node.
    tail: *mut Entry<T>,
}

impl<T> List<T> {
    /// Creates an empty list with linked head and tail sentinels.
    pub(crate) fn new() -> List<T> {
        let head = Box::into_raw(Box::new(Entry::new_sigil()));
        let tail = Box::into_raw(Box::new(Entry::new_sigil()));

        let list = List { len: 0, head, tail };

        unsafe {
            // SAFETY: head and tail are newly allocated and valid pointers
            (*list.head).next = list.tail;
            (*list.tail).prev = list.head;
        }

        list
    }

    /// Returns the current number of items in the list.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no items.
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds a value to the front of the list.
    ///
    /// Returns a pointer to the newly created entry. The pointer stays valid
    /// until the entry is removed from the list or the list is dropped.
    pub(crate) fn push_front(&mut self, v: T) -> *mut Entry<T> {
        let node = Box::into_raw(Box::new(Entry::new(v)));
        // SAFETY: node is a newly allocated entry that is not part of any list yet
        unsafe { self.attach(node) };
        self.len += 1;
        node
    }

    /// Removes the first (most recently added) item and returns its value.
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: both sigils are valid pointers initialized in `new`, and the
        // list is not empty, so there is at least one element between them
        let next = unsafe { (*self.head).next };
        if next == self.tail {
            return None;
        }
        unsafe {
            // SAFETY: next is a regular node in this list
            self.detach(next);
        }
        self.len -= 1;
        // SAFETY: next was detached above and originates from `push_front`,
        // so it is an initialized non-sigil node we now own
        let entry = unsafe { Box::from_raw(next) };
        Some(unsafe { entry.val.assume_init() })
    }

    /// Removes the last (least recently added) item and returns its value.
    pub(crate) fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: both sigils are valid pointers initialized in `new`, and the
        // list is not empty, so there is at least one element between them
        let prev = unsafe { (*self.tail).prev };
        if prev == self.head {
            return None;
        }
        unsafe {
            // SAFETY: prev is a regular node in this list
            self.detach(prev);
        }
        self.len -= 1;
        // SAFETY: prev was detached above and originates from `push_front`,
        // so it is an initialized non-sigil node we now own
        let entry = unsafe { Box::from_raw(prev) };
        Some(unsafe { entry.val.assume_init() })
    }

    /// Moves a node to the front of the list (after the head sentinel).
    ///
    /// # Safety
    ///
    /// This function is unsafe because it dereferences raw pointers.
    /// The caller must ensure that `node` points to a valid entry in the list.
    pub(crate) unsafe fn move_to_front(&mut self, node: *mut Entry<T>) {
        if node.is_null() || node == self.head || node == self.tail {
            return;
        }

        // SAFETY: the caller guarantees node is a valid entry in this list
        unsafe {
            // Already the first item, nothing to move.
            if (*self.head).next == node {
                return;
            }

            self.detach(node);
            self.attach(node);
        }
    }

    /// Detaches a node from the list without deallocating it.
    ///
    /// # Safety
    ///
    /// This function is unsafe because it dereferences raw pointers.
    /// The caller must ensure that `node` is a valid pointer to a node in the
    /// list (not null, not freed, and actually part of this list).
    unsafe fn detach(&mut self, node: *mut Entry<T>) {
        // SAFETY: the caller guarantees that node is a valid entry in the list,
        // which means its prev and next pointers are also valid entries
        unsafe {
            (*(*node).prev).next = (*node).next;
            (*(*node).next).prev = (*node).prev;
        }
    }

    /// Attaches a node after the head sentinel node.
    ///
    /// This effectively makes the node the first item in the list.
    ///
    /// # Safety
    ///
    /// This function is unsafe because it dereferences raw pointers.
    /// The caller must ensure that `node` is a valid pointer to a node that is
    /// not already in the list (e.g., newly allocated or previously detached).
    unsafe fn attach(&mut self, node: *mut Entry<T>) {
        // SAFETY: head is a valid pointer initialized in `new`, and the caller
        // guarantees that node is a valid entry not already in the list
        unsafe {
            (*node).next = (*self.head).next;
            (*node).prev = self.head;
            (*self.head).next = node;
            (*(*node).next).prev = node;
        }
    }

    /// Clears the list, removing and dropping all entries.
    pub(crate) fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }
}

impl<T> Drop for List<T> {
    /// Cleans up all resources used by the list.
    ///
    /// This includes:
    /// 1. Removing and dropping all regular entries
    /// 2. Deallocating the sentinel nodes
    fn drop(&mut self) {
        // Remove all entries
        self.clear();

        // Free the sentinel nodes
        // SAFETY: head and tail are valid pointers initialized in `new` and never
        // modified except to be replaced with null when freed. We check for null
        // here as an extra precaution.
        unsafe {
            if !self.head.is_null() {
                let _ = Box::from_raw(self.head);
                self.head = ptr::null_mut();
            }
            if !self.tail.is_null() {
                let _ = Box::from_raw(self.tail);
                self.tail = ptr::null_mut();
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List").field("length", &self.len).finish()
    }
}
