/// How one account relates to a status, plus its public favourite count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusInteractions {
    pub favourites_count: usize,
    pub favourited: bool,
    pub bookmarked: bool,
}
