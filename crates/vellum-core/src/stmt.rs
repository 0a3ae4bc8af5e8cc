mod condition;
pub use condition::{Condition, Expr};

mod filter;
pub use filter::{Connector, Filter, Op};

mod record;
pub use record::Record;

mod sort;
pub use sort::{Direction, SortBy};

mod value;
pub use value::Value;
