mod error;
mod linked_list;
mod priority_queue;
mod queue;
mod stack;

pub use error::InvariantError;
pub use linked_list::{IntoIter, Iter, LinkedList};
pub use priority_queue::{Priority, PriorityQueue};
pub use queue::Queue;
pub use stack::Stack;
