mod check;
mod run;

pub use run::run;
