//! First-contact layout and the login screen.

use persona_types::profile::Profile;

use crate::page::Page;
use crate::rag::RagConnector;

use super::views;
use super::Controller;

impl<C: RagConnector> Controller<C> {
    /// Build the static layout, default header, footer, then the home screen.
    pub(super) fn initialize(&self, page: &mut Page) {
        let config = self.config();
        let profile = Profile::new(
            &config.profile.default_name,
            &config.profile.default_title,
        );

        page.put(views::META, views::meta_card(&config.page));
        page.put(views::HEADER, views::header_card(&config.page, &profile));
        page.put(views::FOOTER, views::footer_card(&config.page));
        self.home(page);
    }

    /// Welcome image and the API key form.
    pub(super) fn home(&self, page: &mut Page) {
        let config = self.config();
        page.put(views::IMAGE, views::info_card(&config.page));
        page.put(views::LOGIN, views::login_form(config.rag.api_key.as_deref()));
    }
}
