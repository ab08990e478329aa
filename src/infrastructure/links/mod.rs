pub mod signed_link;
