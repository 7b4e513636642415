pub mod intent_reader;
pub mod outcome_writer;
