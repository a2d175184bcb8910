//! External data sources for the Tripwise engine.
//!
//! The [`recommender`] module sources candidate destinations from an
//! OpenAI-compatible chat-completions gateway when a trip request arrives
//! without its own candidate list.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod recommender;
