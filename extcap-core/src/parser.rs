//! Seam to the sentence parser that understands provider output
//!
//! Provider stdout is a sequence of newline-delimited sentences. Turning it
//! into records is the job of an [`OutputParser`] implementation supplied by
//! the embedding application; the orchestrator only hands over the buffered
//! output and consumes the returned records in order.

use crate::{ArgumentDescriptor, InterfaceRecord, LinkTypeRecord};

/// Parser for the three kinds of provider output
pub trait OutputParser: Send + Sync {
    /// Parse `--extcap-interfaces` output
    fn parse_interfaces(&self, output: &str) -> Vec<InterfaceRecord>;

    /// Parse `--extcap-dlts` output
    fn parse_link_types(&self, output: &str) -> Vec<LinkTypeRecord>;

    /// Parse `--extcap-config` output
    fn parse_arguments(&self, output: &str) -> Vec<ArgumentDescriptor>;
}

impl<P: OutputParser + ?Sized> OutputParser for Box<P> {
    fn parse_interfaces(&self, output: &str) -> Vec<InterfaceRecord> {
        (**self).parse_interfaces(output)
    }

    fn parse_link_types(&self, output: &str) -> Vec<LinkTypeRecord> {
        (**self).parse_link_types(output)
    }

    fn parse_arguments(&self, output: &str) -> Vec<ArgumentDescriptor> {
        (**self).parse_arguments(output)
    }
}
