pub mod formulation;
