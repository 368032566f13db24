mod atom;
mod count;
mod element;
pub mod element_table;
mod mass;
