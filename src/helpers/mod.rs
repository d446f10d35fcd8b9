pub mod word_match;
