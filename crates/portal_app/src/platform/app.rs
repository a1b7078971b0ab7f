use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail};
use chrono::Utc;
use portal_core::{
    update, Category, CategoryDraft, Editable, ListScreen, ListStatus, ListViewModel, Msg,
    Notification, NotificationLevel, Session,
};
use portal_engine::{
    ActionItemCategories, ActionItems, CampaignPledges, ReqwestTransport, Resource, Transport,
};
use portal_logging::{portal_debug, portal_error, portal_info, portal_warn};

use super::effects::EffectRunner;
use super::render::{self, TerminalItem};
use super::{config, logging, persistence};
use crate::cli::{Cli, Command, ListArgs, ResourceKind};

/// Slack on top of the transport timeouts before a pending request is
/// considered lost.
const SETTLE_MARGIN: Duration = Duration::from_secs(5);

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let (config, config_problem) = match config::load(&cli.config) {
        Ok(loaded) => (loaded.unwrap_or_default(), None),
        Err(err) => (config::AppConfig::default(), Some(err)),
    };
    logging::initialize(cli.log.unwrap_or(config.log), cli.verbose);
    if let Some(err) = config_problem {
        portal_warn!("Ignoring config {:?}: {:#}", cli.config, err);
    }

    let state_dir = cli.state_dir.unwrap_or_else(|| config.state_dir.clone());
    let mut session = persistence::load_session(&state_dir);

    let command = match cli.command {
        Command::Login { user, token } => {
            println!("Signed in as {user}");
            session.login(Session {
                user_id: user,
                token,
                signed_in_at: Utc::now(),
            });
            return persistence::save_session(&state_dir, &session);
        }
        Command::Logout => {
            match session.logout() {
                Some(previous) => println!("Signed out {}", previous.user_id),
                None => println!("No active session"),
            }
            persistence::clear_session(&state_dir)?;
            return Ok(());
        }
        command => command,
    };

    let mut settings = config.transport_settings();
    if let Some(endpoint) = cli.endpoint {
        settings.endpoint = endpoint;
    }
    settings.bearer_token = session.bearer_token().map(str::to_owned);
    let timeout = settings.connect_timeout + settings.request_timeout + SETTLE_MARGIN;
    let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(settings)?);

    match command {
        Command::List(args) => match args.resource {
            ResourceKind::Categories => list::<ActionItemCategories>(transport, timeout, &args),
            ResourceKind::ActionItems => list::<ActionItems>(transport, timeout, &args),
            ResourceKind::Pledges => list::<CampaignPledges>(transport, timeout, &args),
        },
        Command::Delete {
            resource,
            scope,
            id,
        } => match resource {
            ResourceKind::Categories => delete::<ActionItemCategories>(transport, timeout, &scope, id),
            ResourceKind::ActionItems => delete::<ActionItems>(transport, timeout, &scope, id),
            ResourceKind::Pledges => delete::<CampaignPledges>(transport, timeout, &scope, id),
        },
        Command::CreateCategory {
            scope,
            name,
            description,
            disabled,
        } => {
            let mut screen = ListSession::<ActionItemCategories>::new(transport, timeout);
            screen.open(&scope)?;
            screen.dispatch(Msg::CreateClicked { at: Utc::now() });
            screen.dispatch(Msg::FormSubmitted(CategoryDraft {
                name,
                description,
                is_disabled: disabled,
            }));
            screen.settle()?;
            finish(&mut screen, true)
        }
        Command::UpdateCategory {
            scope,
            id,
            name,
            description,
            disabled,
        } => {
            let mut screen = ListSession::<ActionItemCategories>::new(transport, timeout);
            screen.open(&scope)?;
            if screen.load_failed() {
                return finish(&mut screen, true);
            }
            let original: &Category = screen
                .state()
                .find(&id)
                .ok_or_else(|| anyhow!("no category with id {id} in {scope}"))?;
            let mut draft = original.draft();
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(disabled) = disabled {
                draft.is_disabled = disabled;
            }
            screen.dispatch(Msg::EditClicked { id });
            screen.dispatch(Msg::FormSubmitted(draft));
            screen.settle()?;
            finish(&mut screen, true)
        }
        Command::Login { .. } | Command::Logout => Ok(()),
    }
}

fn list<R>(transport: Arc<dyn Transport>, timeout: Duration, args: &ListArgs) -> anyhow::Result<()>
where
    R: Resource,
    R::Item: TerminalItem,
{
    let mut screen = ListSession::<R>::new(transport, timeout);
    if let Some(field) = &args.search_by {
        let field = R::Item::parse_search_by(field)?;
        screen.dispatch(Msg::SearchByChanged(Some(field)));
    }
    if let Some(status) = &args.status {
        let status = R::Item::parse_status(status)?;
        screen.dispatch(Msg::StatusFilterChanged(Some(status)));
    }
    if let Some(sort) = &args.sort {
        let sort = R::Item::parse_sort(sort)?;
        screen.dispatch(Msg::SortChanged(sort));
    }
    if let Some(term) = &args.search {
        screen.dispatch(Msg::SearchInputChanged(term.clone()));
        screen.dispatch(Msg::SearchSubmitted);
    }
    screen.open(&args.scope)?;
    finish(&mut screen, false)
}

fn delete<R>(
    transport: Arc<dyn Transport>,
    timeout: Duration,
    scope: &str,
    id: String,
) -> anyhow::Result<()>
where
    R: Resource,
    R::Item: TerminalItem,
{
    let mut screen = ListSession::<R>::new(transport, timeout);
    screen.open(scope)?;
    if screen.load_failed() {
        return finish(&mut screen, true);
    }
    if screen.state().find(&id).is_none() {
        bail!("no {} record with id {id} in {scope}", R::NAME);
    }
    screen.dispatch(Msg::DeleteClicked { id });
    screen.dispatch(Msg::DeleteConfirmed);
    screen.settle()?;
    finish(&mut screen, true)
}

/// Prints notifications and the final list. Fails when the collection
/// could not be loaded, on any error notification, and on warnings when
/// `strict` is set.
fn finish<R>(screen: &mut ListSession<R>, strict: bool) -> anyhow::Result<()>
where
    R: Resource,
    R::Item: TerminalItem,
{
    let notifications = screen.take_notifications();
    for notification in &notifications {
        println!("{}", render::notification_line(notification));
    }
    let state = screen.state();
    for line in render::render_list(screen.view(), state.items(), state.header()) {
        println!("{line}");
    }

    if let ListStatus::Failed { message } = &screen.view().status {
        bail!("could not load {}: {message}", R::NAME);
    }
    let rejected = notifications.iter().any(|notification| match notification.level {
        NotificationLevel::Error => true,
        NotificationLevel::Warning => strict,
        NotificationLevel::Success => false,
    });
    if rejected {
        bail!("request was not applied");
    }
    Ok(())
}

/// One list screen driven headlessly: messages go through `update`, effects
/// through the engine, until no request is outstanding.
pub struct ListSession<R: Resource> {
    state: ListScreen<R::Item>,
    view: ListViewModel<R::Item>,
    runner: EffectRunner<R>,
    notifications: Vec<Notification>,
    timeout: Duration,
}

impl<R: Resource> ListSession<R> {
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        let state = ListScreen::new();
        let view = state.view();
        Self {
            state,
            view,
            runner: EffectRunner::new(transport),
            notifications: Vec::new(),
            timeout,
        }
    }

    pub fn dispatch(&mut self, msg: Msg<R::Item>) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
        }
        self.state = state;

        for notification in self.runner.enqueue(effects) {
            portal_info!("{:?}: {}", notification.level, notification.text);
            self.notifications.push(notification);
        }
    }

    /// Feeds engine results back in until nothing is pending.
    pub fn settle(&mut self) -> anyhow::Result<()> {
        while !self.runner.is_idle() {
            let Some(msg) = self.runner.next_msg(self.timeout) else {
                portal_error!("No engine result for {} within {:?}", R::NAME, self.timeout);
                bail!("timed out waiting for {}", R::NAME);
            };
            portal_debug!("Engine result for {}", R::NAME);
            self.dispatch(msg);
        }
        Ok(())
    }

    /// Selects the scope and waits for its collection.
    pub fn open(&mut self, scope_id: &str) -> anyhow::Result<()> {
        self.dispatch(Msg::ScopeSelected(scope_id.to_owned()));
        self.settle()
    }

    pub fn load_failed(&self) -> bool {
        matches!(self.view.status, ListStatus::Failed { .. })
    }

    pub fn state(&self) -> &ListScreen<R::Item> {
        &self.state
    }

    /// View as of the last visible change.
    pub fn view(&self) -> &ListViewModel<R::Item> {
        &self.view
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}
