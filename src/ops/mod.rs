pub mod todo_list;

pub use todo_list::{ListChange, MAX_ITEMS, Subscription, TodoList};
