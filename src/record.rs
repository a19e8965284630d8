use std::str::FromStr;

use serde::Serialize;

use crate::{Error, Result};

/// The fixed set of fields a [`Record`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PageOfOrigin,
    Id,
    Title,
    Author,
    UploadDate,
    PageCount,
    Size,
    EvaluationCount,
    CommentCount,
    Points,
    Rate,
    Tags,
    Content,
    Afterword,
}

impl Field {
    pub const ALL: [Field; 14] = [
        Field::PageOfOrigin,
        Field::Id,
        Field::Title,
        Field::Author,
        Field::UploadDate,
        Field::PageCount,
        Field::Size,
        Field::EvaluationCount,
        Field::CommentCount,
        Field::Points,
        Field::Rate,
        Field::Tags,
        Field::Content,
        Field::Afterword,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Field::PageOfOrigin => "page_of_origin",
            Field::Id => "id",
            Field::Title => "title",
            Field::Author => "author",
            Field::UploadDate => "upload_date",
            Field::PageCount => "page_count",
            Field::Size => "size",
            Field::EvaluationCount => "evaluation_count",
            Field::CommentCount => "comment_count",
            Field::Points => "points",
            Field::Rate => "rate",
            Field::Tags => "tags",
            Field::Content => "content",
            Field::Afterword => "afterword",
        }
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(key: &str) -> Result<Self> {
        Field::ALL
            .into_iter()
            .find(|field| field.key() == key)
            .ok_or_else(|| Error::UnknownField(key.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Page(u32),
    Text(String),
    Tags(Vec<String>),
}

impl From<u32> for Value {
    fn from(page: u32) -> Self {
        Value::Page(page)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<Vec<String>> for Value {
    fn from(tags: Vec<String>) -> Self {
        Value::Tags(tags)
    }
}

/// One listing entry. Every field starts unset and is filled while scraping.
///
/// The listing fields, numeric-looking ones included, are kept as the display strings the
/// site renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    page_of_origin: Option<u32>,
    id: Option<String>,
    title: Option<String>,
    author: Option<String>,
    upload_date: Option<String>,
    page_count: Option<String>,
    size: Option<String>,
    evaluation_count: Option<String>,
    comment_count: Option<String>,
    points: Option<String>,
    rate: Option<String>,
    tags: Option<Vec<String>>,
    content: Option<String>,
    afterword: Option<String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`. Fails with [`Error::UnknownField`] for keys outside the schema.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        self.set_field(key.parse()?, value.into())
    }

    /// Returns the current value under `key`, `None` while it is unset.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.get_field(key.parse()?))
    }

    pub fn set_field(&mut self, field: Field, value: Value) -> Result<()> {
        match (field, value) {
            (Field::PageOfOrigin, Value::Page(page)) => self.page_of_origin = Some(page),
            (Field::Tags, Value::Tags(tags)) => self.tags = Some(tags),
            (Field::PageOfOrigin | Field::Tags, _) => {
                return Err(Error::extraction(format!(
                    "Value of the wrong kind for field [{}].",
                    field.key()
                )))
            }
            (field, Value::Text(text)) => *self.text_slot(field) = Some(text),
            (field, _) => {
                return Err(Error::extraction(format!(
                    "Field [{}] only holds text.",
                    field.key()
                )))
            }
        }
        Ok(())
    }

    pub fn get_field(&self, field: Field) -> Option<Value> {
        match field {
            Field::PageOfOrigin => self.page_of_origin.map(Value::Page),
            Field::Tags => self.tags.clone().map(Value::Tags),
            field => self.text(field).map(Value::from),
        }
    }

    pub fn page_of_origin(&self) -> Option<u32> {
        self.page_of_origin
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn tags(&self) -> Option<&[String]> {
        self.tags.as_deref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn afterword(&self) -> Option<&str> {
        self.afterword.as_deref()
    }

    /// Text of a string-typed field. `PageOfOrigin` and `Tags` never have one.
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::PageOfOrigin | Field::Tags => None,
            Field::Id => self.id.as_deref(),
            Field::Title => self.title.as_deref(),
            Field::Author => self.author.as_deref(),
            Field::UploadDate => self.upload_date.as_deref(),
            Field::PageCount => self.page_count.as_deref(),
            Field::Size => self.size.as_deref(),
            Field::EvaluationCount => self.evaluation_count.as_deref(),
            Field::CommentCount => self.comment_count.as_deref(),
            Field::Points => self.points.as_deref(),
            Field::Rate => self.rate.as_deref(),
            Field::Content => self.content.as_deref(),
            Field::Afterword => self.afterword.as_deref(),
        }
    }

    // Only reachable for text fields; the other two are matched out by the callers.
    fn text_slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Id => &mut self.id,
            Field::Title => &mut self.title,
            Field::Author => &mut self.author,
            Field::UploadDate => &mut self.upload_date,
            Field::PageCount => &mut self.page_count,
            Field::Size => &mut self.size,
            Field::EvaluationCount => &mut self.evaluation_count,
            Field::CommentCount => &mut self.comment_count,
            Field::Points => &mut self.points,
            Field::Rate => &mut self.rate,
            Field::Content => &mut self.content,
            Field::Afterword => &mut self.afterword,
            Field::PageOfOrigin | Field::Tags => unreachable!("not a text field"),
        }
    }

    fn required(&self, field: Field) -> Result<&str> {
        self.text(field)
            .ok_or_else(|| Error::extraction(format!("Field [{}] is not set.", field.key())))
    }

    /// Fixed-width summary: title padded or cut to 32 columns, author to 16, and the
    /// counters left-aligned in 10/10/5/7/7 columns, followed by the tag line.
    pub fn render_summary(&self) -> Result<String> {
        let mut out = format!(
            "{}::{:<32.32}\n    AUTHOR:{:<16.16} UPLOAD:{} SIZE:{:<10} EVAL:{:<10} COMMENT:{:<5} POINT:{:<7} RATE:{:<7}\n    TAG:",
            self.required(Field::Id)?,
            self.required(Field::Title)?,
            self.required(Field::Author)?,
            self.required(Field::UploadDate)?,
            self.required(Field::Size)?,
            self.required(Field::EvaluationCount)?,
            self.required(Field::CommentCount)?,
            self.required(Field::Points)?,
            self.required(Field::Rate)?,
        );
        for tag in self.tags.iter().flatten() {
            out.push_str(tag);
            out.push(' ');
        }
        Ok(out)
    }

    pub fn render_content(&self) -> Result<String> {
        Ok(format!(
            "[TITLE]\n{}\n\n[CONTENT]\n{}\n\n[AFTERWORD]\n{}",
            self.required(Field::Title)?,
            self.required(Field::Content)?,
            self.required(Field::Afterword)?,
        ))
    }
}
