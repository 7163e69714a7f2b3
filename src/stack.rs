// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! A persistent singly linked stack

use std::fmt;
use std::sync::Arc;

struct Cell<T> {
    head: T,
    tail: ImmutableStack<T>,
}

/// An immutable stack. `push` and `pop` return new stacks that share their tails with the original,
/// so a stack can be cloned and forked in constant time.
pub struct ImmutableStack<T> {
    cell: Option<Arc<Cell<T>>>,
}

impl<T> ImmutableStack<T> {
    pub fn empty() -> ImmutableStack<T> {
        ImmutableStack { cell: None }
    }

    pub fn is_empty(&self) -> bool {
        self.cell.is_none()
    }

    pub fn push(&self, head: T) -> ImmutableStack<T> {
        ImmutableStack {
            cell: Some(Arc::new(Cell {
                head,
                tail: self.clone(),
            })),
        }
    }

    /// The top of the stack, if any
    pub fn peek(&self) -> Option<&T> {
        self.cell.as_ref().map(|cell| &cell.head)
    }

    /// The stack without its top. Popping an empty stack gives an empty stack.
    pub fn pop(&self) -> ImmutableStack<T> {
        match self.cell {
            Some(ref cell) => cell.tail.clone(),
            None => ImmutableStack::empty(),
        }
    }

    /// Iterate from the top down
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { next: self.cell.as_deref() }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }
}

impl<T> Clone for ImmutableStack<T> {
    fn clone(&self) -> Self {
        ImmutableStack { cell: self.cell.clone() }
    }
}

impl<T> Default for ImmutableStack<T> {
    fn default() -> Self {
        ImmutableStack::empty()
    }
}

impl<T: fmt::Debug> fmt::Debug for ImmutableStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

pub struct Iter<'a, T> {
    next: Option<&'a Cell<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.next.map(|cell| {
            self.next = cell.tail.cell.as_deref();
            &cell.head
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_pop() {
        let empty = ImmutableStack::empty();
        assert!(empty.is_empty());
        assert_eq!(None, empty.peek());

        let one = empty.push(1);
        let two = one.push(2);
        assert_eq!(Some(&2), two.peek());
        assert_eq!(Some(&1), two.pop().peek());
        assert!(two.pop().pop().is_empty());
        assert!(empty.pop().is_empty());
        assert_eq!(2, two.len());
    }

    #[test]
    fn versions_are_independent() {
        let base = ImmutableStack::empty().push(1).push(2);
        let left = base.push(3);
        let right = base.pop().push(4);

        assert_eq!(vec![3, 2, 1], left.iter().cloned().collect::<Vec<_>>());
        assert_eq!(vec![4, 1], right.iter().cloned().collect::<Vec<_>>());
        assert_eq!(vec![2, 1], base.iter().cloned().collect::<Vec<_>>());
    }
}
