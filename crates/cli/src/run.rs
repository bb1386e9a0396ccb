use std::sync::Arc;

use anyhow::Context as _;
use labadmin_client::config::ClientConfig;
use labadmin_client::models::user::UserProfile;
use labadmin_client::LabClient;
use labadmin_console::notify::{AlwaysConfirm, TracingNotifier};
use labadmin_console::resources::{
    CategoriesResource, MyAchievementsResource, NewsResource, PapersResource, ProjectsResource,
    PublicAchievementsSource, UsersResource,
};
use labadmin_console::{
    Confirmer, Flag, FlagSource, ListController, ListSource, Notifier, Pager, ResourceApi,
};
use labadmin_core::session::{CurrentUser, SessionContext};

use crate::args::{
    CategoryCommand, Cli, Command, ListArgs, MineCommand, ProjectCommand, RecordCommand,
};
use crate::prompt::StdinConfirm;
use crate::render::{self, Row};

/// Keyword-bearing filter types.
trait KeywordFilter {
    fn set_keyword(&mut self, keyword: Option<String>);
}

macro_rules! keyword_filter {
    ($($ty:ty => $field:ident),+ $(,)?) => {
        $(impl KeywordFilter for $ty {
            fn set_keyword(&mut self, keyword: Option<String>) {
                self.$field = keyword;
            }
        })+
    };
}

keyword_filter! {
    labadmin_client::models::user::UserQuery => keyword,
    labadmin_client::models::achievement::AchievementQuery => keyword,
    labadmin_client::models::category::CategoryQuery => keyword,
    labadmin_client::models::news::NewsQuery => title,
    labadmin_client::models::public::PublicQuery => keyword,
}

struct Context {
    client: LabClient,
    session: SessionContext,
    notifier: Arc<dyn Notifier>,
    confirmer: Arc<dyn Confirmer>,
    page_size: u32,
}

impl Context {
    fn controller<R: ResourceApi>(&self, api: R, args: &ListArgs) -> ListController<R> {
        ListController::new(
            api,
            self.session.clone(),
            self.notifier.clone(),
            self.confirmer.clone(),
        )
        .with_page_size(args.page_size.unwrap_or(self.page_size))
    }

    fn pager<S: ListSource>(&self, source: S, args: &ListArgs) -> Pager<S> {
        Pager::new(Arc::new(source), self.notifier.clone())
            .with_session(self.session.clone())
            .with_page_size(args.page_size.unwrap_or(self.page_size))
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ClientConfig::from_env().context("Invalid client configuration")?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if cli.token.is_some() {
        config.token = cli.token;
    }
    let client = LabClient::from_config(&config).context("Failed to build API client")?;

    let confirmer: Arc<dyn Confirmer> = if cli.yes {
        Arc::new(AlwaysConfirm)
    } else {
        Arc::new(StdinConfirm)
    };
    let session = load_session(&client, config.token.is_some()).await;
    let ctx = Context {
        client,
        session,
        notifier: Arc::new(TracingNotifier),
        confirmer,
        page_size: config.page_size,
    };

    match cli.command {
        Command::Whoami => whoami(&ctx).await,
        Command::Users { command } => {
            record(&ctx, command, || UsersResource::new(ctx.client.clone())).await
        }
        Command::Papers { command } => {
            record(&ctx, command, || PapersResource::new(ctx.client.clone())).await
        }
        Command::News { command } => {
            record(&ctx, command, || NewsResource::new(ctx.client.clone())).await
        }
        Command::Projects { command } => projects(&ctx, command).await,
        Command::Categories { command } => categories(&ctx, command).await,
        Command::Mine { command } => mine(&ctx, command).await,
        Command::Public(args) => {
            let pager = ctx.pager(PublicAchievementsSource::new(ctx.client.clone()), &args);
            load(&pager, &args).await?;
            println!("{}", render::page(&pager.snapshot().await));
            Ok(())
        }
    }
}

/// The profile behind the token, or an anonymous session.
async fn load_session(client: &LabClient, has_token: bool) -> SessionContext {
    if !has_token {
        return SessionContext::anonymous();
    }
    match client.users().profile().await {
        Ok(profile) => {
            let user = CurrentUser::from(&profile);
            tracing::info!(user_id = user.id, identity = user.identity.label(), "Signed in");
            SessionContext::new(user)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not load profile; continuing anonymously");
            SessionContext::anonymous()
        }
    }
}

async fn whoami(ctx: &Context) -> anyhow::Result<()> {
    let profile: UserProfile = ctx.client.users().profile().await?;
    let user = &profile.user;
    println!("{} ({})", user.display_name(), user.username);
    println!(
        "identity: {}",
        profile
            .identity_desc
            .clone()
            .unwrap_or_else(|| user.identity.label().to_string())
    );
    println!("status:   {}", user.status_label());
    Ok(())
}

/// Apply `args` to a pager and load the requested page.
async fn load<S>(pager: &Pager<S>, args: &ListArgs) -> anyhow::Result<()>
where
    S: ListSource,
    S::Filters: KeywordFilter,
{
    pager
        .update_filters(|f| f.set_keyword(args.keyword.clone()))
        .await;
    if args.page > 1 {
        pager.set_page(args.page).await?;
    } else {
        pager.search().await?;
    }
    Ok(())
}

async fn record<R>(
    ctx: &Context,
    command: RecordCommand,
    make: impl FnOnce() -> R,
) -> anyhow::Result<()>
where
    R: ResourceApi + FlagSource,
    R::Filters: KeywordFilter,
    R::Item: Row,
{
    match command {
        RecordCommand::List(args) => {
            let controller = ctx.controller(make(), &args);
            load(controller.pager(), &args).await?;
            println!("{}", render::page(&controller.snapshot().await));
        }
        RecordCommand::Toggle { id, flag, list } => {
            let controller = ctx.controller(make(), &list);
            load(controller.pager(), &list).await?;
            let flag = Flag::from(flag);
            let value = controller.toggle_flag(id, flag).await?;
            println!("{} {id}: {flag} = {value}", controller.api().name());
        }
        RecordCommand::Delete { id, list } => {
            let controller = ctx.controller(make(), &list);
            load(controller.pager(), &list).await?;
            controller.remove_by_id(id).await?;
            println!("Deleted {} {id}", controller.api().name());
        }
    }
    Ok(())
}

async fn projects(ctx: &Context, command: ProjectCommand) -> anyhow::Result<()> {
    let make = || ProjectsResource::new(ctx.client.clone());
    match command {
        ProjectCommand::Record(command) => record(ctx, command, make).await,
        ProjectCommand::Related { id } => {
            let papers = make().related_papers(id).await?;
            if papers.is_empty() {
                println!("No related papers");
            }
            for paper in papers {
                println!(
                    "{}\t{}\t{}",
                    paper.id,
                    paper.title,
                    labadmin_core::format::or_dash(paper.venue.as_deref())
                );
            }
            Ok(())
        }
        ProjectCommand::Legacy(args) => {
            let request = labadmin_client::PageRequest::new(
                args.page,
                args.page_size.unwrap_or(ctx.page_size),
            );
            let page = make().legacy(request).await?;
            println!("{}", render::table(&page.items));
            println!("page {}, {} total", page.page_num, page.total);
            Ok(())
        }
    }
}

async fn categories(ctx: &Context, command: CategoryCommand) -> anyhow::Result<()> {
    let make = || CategoriesResource::new(ctx.client.clone());
    match command {
        CategoryCommand::Record(command) => record(ctx, command, make).await,
        CategoryCommand::Tree { include_inactive } => {
            let tree = make().tree(include_inactive).await?;
            for group in &tree {
                println!("{} [{}]", group.category_name, group.id);
                for child in &group.children {
                    let state = if child.is_active { "" } else { " (inactive)" };
                    println!("  {} [{}]{state}", child.category_name, child.id);
                }
            }
            Ok(())
        }
    }
}

async fn mine(ctx: &Context, command: MineCommand) -> anyhow::Result<()> {
    match command {
        MineCommand::List(args) => {
            let pager = ctx.pager(MyAchievementsResource::new(ctx.client.clone()), &args);
            load(&pager, &args).await?;
            println!("{}", render::page(&pager.snapshot().await));
        }
        MineCommand::ToggleVisibility { id, list } => {
            let pager = ctx.pager(MyAchievementsResource::new(ctx.client.clone()), &list);
            load(&pager, &list).await?;
            let visible = pager
                .toggle_flag(id, Flag::Visibility)
                .await?;
            println!("achievement {id}: {}", if visible { "shown" } else { "hidden" });
        }
    }
    Ok(())
}
