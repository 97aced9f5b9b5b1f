pub mod walkthrough;
