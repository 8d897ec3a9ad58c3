pub mod fundraising;
