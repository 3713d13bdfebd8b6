use strum_macros::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Default)]
pub enum Role {
    #[default]
    User,
    Assistant,
}
