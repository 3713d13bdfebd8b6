use ratatui::widgets::ScrollbarState;

/// Line-based scroll position over the rendered transcript.
#[derive(Debug, Default, Clone)]
pub struct Scroll {
    pub position: usize,
    pub scrollbar_state: ScrollbarState,
    list_length: usize,
    viewport_length: usize,
}

impl Scroll {
    fn max_position(&self) -> usize {
        return self.list_length.saturating_sub(self.viewport_length);
    }

    fn sync_scrollbar(&mut self) {
        self.scrollbar_state = ScrollbarState::new(self.max_position()).position(self.position);
    }

    pub fn set_state(&mut self, list_length: usize, viewport_length: usize) {
        self.list_length = list_length;
        self.viewport_length = viewport_length;
        if self.position > self.max_position() {
            self.position = self.max_position();
        }
        self.sync_scrollbar();
    }

    pub fn up(&mut self) {
        self.position = self.position.saturating_sub(1);
        self.sync_scrollbar();
    }

    pub fn down(&mut self) {
        self.position = (self.position + 1).min(self.max_position());
        self.sync_scrollbar();
    }

    pub fn up_page(&mut self) {
        self.position = self.position.saturating_sub(self.viewport_length.max(1));
        self.sync_scrollbar();
    }

    pub fn down_page(&mut self) {
        self.position = (self.position + self.viewport_length.max(1)).min(self.max_position());
        self.sync_scrollbar();
    }

    pub fn last(&mut self) {
        self.position = self.max_position();
        self.sync_scrollbar();
    }

    pub fn is_position_at_last(&self) -> bool {
        return self.position >= self.max_position();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_clamps_to_the_list() {
        let mut scroll = Scroll::default();
        scroll.set_state(10, 4);

        scroll.up();
        assert_eq!(scroll.position, 0);

        scroll.last();
        assert_eq!(scroll.position, 6);
        scroll.down();
        assert_eq!(scroll.position, 6);
        assert!(scroll.is_position_at_last());
    }

    #[test]
    fn it_pages_by_viewport() {
        let mut scroll = Scroll::default();
        scroll.set_state(20, 5);

        scroll.down_page();
        assert_eq!(scroll.position, 5);
        scroll.down_page();
        scroll.down_page();
        scroll.down_page();
        assert_eq!(scroll.position, 15);
        scroll.up_page();
        assert_eq!(scroll.position, 10);
    }

    #[test]
    fn it_stays_at_top_when_everything_fits() {
        let mut scroll = Scroll::default();
        scroll.set_state(3, 10);
        scroll.last();

        assert_eq!(scroll.position, 0);
        assert!(scroll.is_position_at_last());
    }

    #[test]
    fn it_pulls_position_back_when_the_list_shrinks() {
        let mut scroll = Scroll::default();
        scroll.set_state(30, 10);
        scroll.last();
        scroll.set_state(12, 10);

        assert_eq!(scroll.position, 2);
    }
}
