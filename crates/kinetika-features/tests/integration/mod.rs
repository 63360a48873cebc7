mod builtin_scenarios;
mod file_tables;
mod shared_gate;
