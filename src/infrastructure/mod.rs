pub mod db;
pub mod links;
