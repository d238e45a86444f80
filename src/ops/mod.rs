pub mod alloc;
pub mod create_task;

pub use alloc::{CountingAllocator, IdAllocator, UuidAllocator, allocator_for};
pub use create_task::{CreatedTask, Notifier, TaskAssembler, WorkflowError};
