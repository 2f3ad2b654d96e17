// Dashboard views: the comparison matrix, the candidate roster (sidebar)
// and the page header. Each view re-derives from the live selection on
// every request.

pub mod handlers;
pub mod header;
pub mod matrix;
pub mod roster;
