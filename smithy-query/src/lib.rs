/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Abstractions for writing the `application/x-www-form-urlencoded` bodies used by the
//! AWS Query and EC2 Query protocols.

use smithy_types::instant::Format;
use smithy_types::Instant;
use urlencoding::encode;

/// Writes the `Action` and `Version` of a query request followed by its members
///
/// ```rust
/// use smithy_query::QueryWriter;
/// let mut out = String::new();
/// let mut writer = QueryWriter::new(&mut out, "SomeAction", "1.0");
/// writer.prefix("DryRun").boolean(true);
/// writer.prefix("Name").string("a b");
/// writer.finish();
/// assert_eq!(out, "Action=SomeAction&Version=1.0&DryRun=true&Name=a%20b");
/// ```
pub struct QueryWriter<'a> {
    output: &'a mut String,
}

impl<'a> QueryWriter<'a> {
    pub fn new(output: &'a mut String, action: &str, version: &str) -> Self {
        output.push_str("Action=");
        output.push_str(&encode(action));
        output.push_str("&Version=");
        output.push_str(&encode(version));
        QueryWriter { output }
    }

    /// Starts a member named `key`; the value is written by the returned writer
    pub fn prefix(&mut self, key: &str) -> QueryValueWriter {
        QueryValueWriter::new(self.output, key)
    }

    pub fn finish(self) {}
}

/// Writes a single `&key=value` pair
#[must_use]
pub struct QueryValueWriter<'a> {
    output: &'a mut String,
    key: String,
}

impl<'a> QueryValueWriter<'a> {
    fn new(output: &'a mut String, key: &str) -> Self {
        QueryValueWriter {
            output,
            key: encode(key).to_string(),
        }
    }

    pub fn string(self, value: &str) {
        let value = encode(value);
        self.write(&value);
    }

    pub fn boolean(self, value: bool) {
        self.write(if value { "true" } else { "false" });
    }

    pub fn integer(self, value: i64) {
        self.write(&value.to_string());
    }

    /// Query timestamps default to `date-time`
    pub fn instant(self, value: &Instant) {
        let value = value.fmt(Format::DateTime);
        self.write(&encode(&value));
    }

    fn write(self, value: &str) {
        self.output.push('&');
        self.output.push_str(&self.key);
        self.output.push('=');
        self.output.push_str(value);
    }
}
