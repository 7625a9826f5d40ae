pub mod concierge;
