//! Visitor sessions
//!
//! A `Session` owns every panel controller for one visitor. Each transition
//! runs under the session mutex. The delayed chat reply and the contact form
//! timers are one-shot tasks that re-lock the session when they fire; they are
//! never cancelled. Chat views are published on a `watch` channel after every
//! change so live displays can follow along.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex, RwLock};
use uuid::Uuid;

use crate::config::content::{Review, SiteContent};
use crate::providers::ReplyGenerator;

use super::carousel::{Carousel, CarouselError};
use super::catalog::{
    self, ExperienceView, FunView, HobbySpotlight, ProjectFilter, ProjectsView, ReviewsView,
};
use super::chat::{ChatPanel, ChatView, ConversationSnapshot, Key, ReplyTicket, RestoreError};
use super::contact::{
    ContactError, ContactField, ContactForm, ContactView, SubmitOutcome, CONFIRMATION_DELAY,
    SEND_DELAY,
};
use super::navigation::{NavContext, Section, SidebarView};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Reviews carousel: {0}")]
    Carousel(#[from] CarouselError),

    #[error("Restore failed: {0}")]
    Restore(#[from] RestoreError),
}

/// Mutable panel state of one session
struct PanelState {
    nav: NavContext,
    chat: ChatPanel,
    reviews: Carousel<Review>,
    project_filter: ProjectFilter,
    spotlight: HobbySpotlight,
    contact: ContactForm,
}

/// Save/load boundary for a session's interaction state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub section: Section,
    pub conversation: ConversationSnapshot,
    pub review_index: usize,
}

pub struct Session {
    id: Uuid,
    content: Arc<SiteContent>,
    replies: Arc<dyn ReplyGenerator>,
    state: Mutex<PanelState>,
    chat_tx: watch::Sender<ChatView>,
}

impl Session {
    pub fn new(
        content: Arc<SiteContent>,
        replies: Arc<dyn ReplyGenerator>,
    ) -> Result<Self, SessionError> {
        let chat = ChatPanel::new(&content.chat.greeting, content.chat.suggestions.clone());
        let (chat_tx, _) = watch::channel(chat.view());

        let state = PanelState {
            nav: NavContext::new(),
            chat,
            reviews: Carousel::new(content.reviews.clone())?,
            project_filter: ProjectFilter::All,
            spotlight: HobbySpotlight::default(),
            contact: ContactForm::new(),
        };

        Ok(Self {
            id: Uuid::new_v4(),
            content,
            replies,
            state: Mutex::new(state),
            chat_tx,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    // ========== Sidebar ==========

    pub async fn sidebar(&self) -> SidebarView {
        self.state.lock().await.nav.view(&self.content.profile)
    }

    pub async fn navigate(&self, section: Section) -> SidebarView {
        let mut state = self.state.lock().await;
        state.nav.navigate(section);
        tracing::debug!(session = %self.id, section = section.as_str(), "Navigated");
        state.nav.view(&self.content.profile)
    }

    pub async fn toggle_theme(&self) -> SidebarView {
        let mut state = self.state.lock().await;
        state.nav.toggle_theme();
        state.nav.view(&self.content.profile)
    }

    pub async fn toggle_mobile_menu(&self) -> SidebarView {
        let mut state = self.state.lock().await;
        state.nav.toggle_mobile_menu();
        state.nav.view(&self.content.profile)
    }

    // ========== Chat ==========

    pub async fn chat(&self) -> ChatView {
        self.state.lock().await.chat.view()
    }

    /// Live chat views, starting with the current one
    pub fn subscribe_chat(&self) -> watch::Receiver<ChatView> {
        self.chat_tx.subscribe()
    }

    pub async fn set_input(self: &Arc<Self>, text: String) -> ChatView {
        self.update_chat(|chat| {
            chat.set_input(text);
            None
        })
        .await
    }

    /// Returns `None` for chips that are not offered
    pub async fn apply_suggestion(self: &Arc<Self>, chip: &str) -> Option<ChatView> {
        let mut applied = false;
        let view = self
            .update_chat(|chat| {
                applied = chat.apply_suggestion(chip);
                None
            })
            .await;
        applied.then_some(view)
    }

    pub async fn key_press(self: &Arc<Self>, key: Key, shift: bool) -> ChatView {
        self.update_chat(|chat| chat.key_press(key, shift)).await
    }

    /// Submit a chat message. Rejected submissions leave the view unchanged.
    pub async fn submit_message(self: &Arc<Self>, text: &str) -> ChatView {
        self.update_chat(|chat| chat.submit(text)).await
    }

    /// Apply a chat transition, publish the result and schedule the reply if
    /// a message was accepted
    async fn update_chat<F>(self: &Arc<Self>, f: F) -> ChatView
    where
        F: FnOnce(&mut ChatPanel) -> Option<ReplyTicket>,
    {
        let mut state = self.state.lock().await;
        let ticket = f(&mut state.chat);
        let view = state.chat.view();
        self.chat_tx.send_replace(view.clone());
        drop(state);

        if let Some(ticket) = ticket {
            tracing::info!(
                session = %self.id,
                message = ?ticket.user_message,
                "Accepted chat message"
            );
            self.schedule_reply(ticket);
        }
        view
    }

    fn schedule_reply(self: &Arc<Self>, ticket: ReplyTicket) {
        let session = Arc::clone(self);
        tokio::spawn(async move {
            let reply = session.replies.generate_reply(&ticket.user_text).await;
            tokio::time::sleep(reply.delay).await;

            let mut state = session.state.lock().await;
            let id = state.chat.deliver_reply(ticket, &reply.content);
            session.chat_tx.send_replace(state.chat.view());
            tracing::debug!(session = %session.id, message = ?id, "Delivered reply");
        });
    }

    // ========== Projects / Experience / Fun ==========

    pub async fn projects(&self) -> ProjectsView {
        let filter = self.state.lock().await.project_filter;
        catalog::projects_view(&self.content, filter)
    }

    pub async fn set_project_filter(&self, filter: ProjectFilter) -> ProjectsView {
        self.state.lock().await.project_filter = filter;
        catalog::projects_view(&self.content, filter)
    }

    pub fn experience(&self) -> ExperienceView {
        catalog::experience_view(&self.content)
    }

    pub async fn fun(&self) -> FunView {
        let state = self.state.lock().await;
        catalog::fun_view(&self.content, &state.spotlight)
    }

    /// Returns `None` when `hobby` is not in the content
    pub async fn toggle_hobby(&self, hobby: &str) -> Option<FunView> {
        self.content.hobby(hobby)?;
        let mut state = self.state.lock().await;
        state.spotlight.toggle(hobby);
        Some(catalog::fun_view(&self.content, &state.spotlight))
    }

    // ========== Reviews ==========

    pub async fn reviews(&self) -> ReviewsView {
        catalog::reviews_view(&self.state.lock().await.reviews)
    }

    pub async fn next_review(&self) -> ReviewsView {
        let mut state = self.state.lock().await;
        state.reviews.next();
        catalog::reviews_view(&state.reviews)
    }

    pub async fn prev_review(&self) -> ReviewsView {
        let mut state = self.state.lock().await;
        state.reviews.prev();
        catalog::reviews_view(&state.reviews)
    }

    pub async fn jump_to_review(&self, index: usize) -> ReviewsView {
        let mut state = self.state.lock().await;
        state.reviews.jump_to(index);
        catalog::reviews_view(&state.reviews)
    }

    // ========== Contact ==========

    pub async fn contact(&self) -> ContactView {
        self.state.lock().await.contact.view(&self.content.contact)
    }

    pub async fn update_contact_field(&self, field: ContactField, value: String) -> ContactView {
        let mut state = self.state.lock().await;
        state.contact.update_field(field, value);
        state.contact.view(&self.content.contact)
    }

    /// Validate and start the simulated send
    pub async fn submit_contact(self: &Arc<Self>) -> Result<ContactView, ContactError> {
        let mut state = self.state.lock().await;
        if state.contact.submit()? == SubmitOutcome::Started {
            let generation = state.contact.generation();
            // Only the shape of the message is logged, never its contents
            tracing::debug!(
                session = %self.id,
                message_chars = state.contact.data().message.chars().count(),
                "Simulating contact form delivery"
            );
            self.schedule_contact_timers(generation);
        }
        Ok(state.contact.view(&self.content.contact))
    }

    fn schedule_contact_timers(self: &Arc<Self>, generation: u64) {
        let session = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(SEND_DELAY).await;
            session.state.lock().await.contact.finish_sending();

            tokio::time::sleep(CONFIRMATION_DELAY).await;
            session
                .state
                .lock()
                .await
                .contact
                .dismiss_confirmation(generation);
        });
    }

    // ========== Snapshot ==========

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().await;
        SessionSnapshot {
            section: state.nav.active(),
            conversation: state.chat.snapshot(),
            review_index: state.reviews.selected_index(),
        }
    }

    /// Load a saved snapshot. Fails without changes while a reply is pending.
    pub async fn restore(
        &self,
        snapshot: SessionSnapshot,
    ) -> Result<SessionSnapshot, SessionError> {
        let mut state = self.state.lock().await;
        state.chat.restore(snapshot.conversation)?;
        state.nav.navigate(snapshot.section);
        state.reviews.jump_to(snapshot.review_index);
        self.chat_tx.send_replace(state.chat.view());
        tracing::info!(session = %self.id, "Restored snapshot");

        Ok(SessionSnapshot {
            section: state.nav.active(),
            conversation: state.chat.snapshot(),
            review_index: state.reviews.selected_index(),
        })
    }
}

/// All live sessions, keyed by id
pub struct SessionRegistry {
    content: Arc<SiteContent>,
    replies: Arc<dyn ReplyGenerator>,
    sessions: RwLock<HashMap<Uuid, Arc<Session>>>,
}

impl SessionRegistry {
    pub fn new(content: Arc<SiteContent>, replies: Arc<dyn ReplyGenerator>) -> Self {
        Self {
            content,
            replies,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn create(&self) -> Result<Arc<Session>, SessionError> {
        let session = Arc::new(Session::new(
            Arc::clone(&self.content),
            Arc::clone(&self.replies),
        )?);
        self.sessions
            .write()
            .await
            .insert(session.id(), Arc::clone(&session));
        tracing::info!(session = %session.id(), "Session created");
        Ok(session)
    }

    pub async fn get(&self, id: &Uuid) -> Option<Arc<Session>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Tear a session down. Its history goes with it.
    pub async fn remove(&self, id: &Uuid) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            tracing::info!(session = %id, "Session closed");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
