pub mod st2;
