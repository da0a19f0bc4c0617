pub mod dualshock;
