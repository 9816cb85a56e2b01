//! Control-flow graphs over lowered statement lists.
//!
//! Used to check that every path through a non-void function ends in `return`, and
//! to render a function body as Graphviz for debugging.

pub mod control_flow_graph;

#[cfg(test)]
mod tests;
