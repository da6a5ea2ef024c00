pub mod bindings;
pub mod clonecell;
pub mod copyhashmap;
pub mod errorfmt;
pub mod event_listener;
pub mod numcell;
pub mod oserror;
pub mod ptr_ext;
pub mod rc_eq;
pub mod vecset;
