//! Interactive console session.
//!
//! A line-oriented shell over the proxy list and per-proxy route list
//! screens. The session keeps one query cache; every mutation invalidates
//! the affected entries and the next render refetches. Failures are
//! reported as one transient message and leave the rendered state alone.

pub mod cache;
pub mod proxy_view;
pub mod route_view;

pub use cache::{QueryCache, QueryKey};
pub use proxy_view::ProxyListView;
pub use route_view::RouteListView;

use std::io::{BufRead, Write};

use crate::cli::output::truncate;
use crate::client::ApiClient;
use crate::domain::{
    HeaderRuleType, HttpMethod, ProxyForm, Route, RouteCookie, RouteForm, RouteHeader,
};
use crate::errors::{Error, Result};

/// Screen change requested by a command
enum Transition {
    Stay,
    OpenRoutes(String),
    Back,
    Quit,
}

/// Interactive navigation shell. Generic over its input/output streams so
/// sessions can be driven from tests as well as a terminal.
pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run the session until `quit` or end of input
    pub async fn run(&mut self, client: &ApiClient) -> Result<()> {
        let mut cache = QueryCache::new();
        let mut proxies = ProxyListView::new();
        let mut routes: Option<RouteListView> = None;

        writeln!(self.output, "proxyctl console - type 'help' for commands")?;
        self.refresh_and_render_proxies(client, &mut cache, &mut proxies).await?;

        loop {
            let prompt = match &routes {
                Some(view) => format!("proxyctl/{}> ", view.proxy()),
                None => "proxyctl> ".to_string(),
            };

            let Some(line) = self.read_line(&prompt)? else { break };
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }

            let mut parts = line.split_whitespace();
            let command = parts.next().unwrap_or("");
            let args: Vec<String> = parts.map(str::to_string).collect();

            let transition = match routes.as_mut() {
                Some(view) => {
                    self.handle_route_command(client, &mut cache, view, command, &args).await?
                }
                None => {
                    self.handle_proxy_command(client, &mut cache, &mut proxies, command, &args)
                        .await?
                }
            };

            match transition {
                Transition::Stay => {}
                Transition::Quit => break,
                Transition::Back => {
                    routes = None;
                    self.refresh_and_render_proxies(client, &mut cache, &mut proxies).await?;
                }
                Transition::OpenRoutes(proxy) => {
                    let mut view = RouteListView::new(proxy);
                    self.refresh_and_render_routes(client, &mut cache, &mut view).await?;
                    routes = Some(view);
                }
            }
        }

        Ok(())
    }

    // === proxy list screen ===

    async fn handle_proxy_command(
        &mut self,
        client: &ApiClient,
        cache: &mut QueryCache,
        view: &mut ProxyListView,
        command: &str,
        args: &[String],
    ) -> Result<Transition> {
        match command {
            "help" => self.print_proxy_help()?,
            "list" | "ls" => {
                self.refresh_and_render_proxies(client, cache, view).await?;
            }
            "next" | "n" => {
                if view.next_page() {
                    self.refresh_and_render_proxies(client, cache, view).await?;
                } else {
                    writeln!(self.output, "no next page")?;
                }
            }
            "prev" | "p" => {
                if view.previous_page() {
                    self.refresh_and_render_proxies(client, cache, view).await?;
                } else {
                    writeln!(self.output, "no previous page")?;
                }
            }
            "add" => {
                let mut form = self.prompt_proxy_form(None)?;
                loop {
                    match view.submit(client, cache, &form, None).await {
                        Ok(saved) => {
                            writeln!(self.output, "proxy '{}' added", saved.name)?;
                            self.refresh_and_render_proxies(client, cache, view).await?;
                            break;
                        }
                        Err(e) => {
                            // keep the entered values; the form stays open
                            self.notify(&e)?;
                            if !self.confirm("Edit and retry?")? {
                                break;
                            }
                            form = self.prompt_proxy_form(Some(form))?;
                        }
                    }
                }
            }
            "edit" => {
                let Some(id) = self.parse_id(args.first())? else {
                    return Ok(Transition::Stay);
                };
                let Some(existing) = view.find(id).cloned() else {
                    writeln!(self.output, "no proxy with id {id} on this page")?;
                    return Ok(Transition::Stay);
                };
                let mut form = self.prompt_proxy_form(Some(ProxyForm::from_proxy(&existing)))?;
                loop {
                    match view.submit(client, cache, &form, Some(id)).await {
                        Ok(saved) => {
                            writeln!(self.output, "proxy '{}' updated", saved.name)?;
                            self.refresh_and_render_proxies(client, cache, view).await?;
                            break;
                        }
                        Err(e) => {
                            self.notify(&e)?;
                            if !self.confirm("Edit and retry?")? {
                                break;
                            }
                            form = self.prompt_proxy_form(Some(form))?;
                        }
                    }
                }
            }
            "delete" => {
                let Some(id) = self.parse_id(args.first())? else {
                    return Ok(Transition::Stay);
                };
                view.request_delete(id);
                let confirmed = self
                    .confirm(&format!("Delete proxy {id}? This cannot be undone."))?;
                if confirmed {
                    match view.confirm_delete(client, cache).await {
                        Ok(deleted) => {
                            writeln!(self.output, "proxy {deleted} deleted")?;
                            self.refresh_and_render_proxies(client, cache, view).await?;
                        }
                        Err(e) => self.notify(&e)?,
                    }
                } else {
                    view.cancel_delete();
                    writeln!(self.output, "cancelled")?;
                }
            }
            "open" => match args.first() {
                Some(name) => return Ok(Transition::OpenRoutes(name.clone())),
                None => writeln!(self.output, "usage: open <proxy-name>")?,
            },
            "quit" | "exit" => return Ok(Transition::Quit),
            other => writeln!(self.output, "unknown command '{other}', try 'help'")?,
        }

        Ok(Transition::Stay)
    }

    fn print_proxy_help(&mut self) -> Result<()> {
        writeln!(self.output, "commands:")?;
        writeln!(self.output, "  list            show the current page of proxies")?;
        writeln!(self.output, "  next / prev     move between pages")?;
        writeln!(self.output, "  add             add a proxy")?;
        writeln!(self.output, "  edit <id>       edit a proxy on this page")?;
        writeln!(self.output, "  delete <id>     delete a proxy (asks for confirmation)")?;
        writeln!(self.output, "  open <name>     open a proxy's route list")?;
        writeln!(self.output, "  quit            leave the console")?;
        Ok(())
    }

    fn prompt_proxy_form(&mut self, existing: Option<ProxyForm>) -> Result<ProxyForm> {
        let existing = existing.unwrap_or_default();
        let name = self.prompt_with_default("Name", &existing.name)?;
        let uri = self.prompt_with_default("URI", &existing.uri)?;
        let description = self
            .prompt_with_default("Description", existing.description.as_deref().unwrap_or(""))?;

        Ok(ProxyForm {
            name,
            uri,
            description: if description.is_empty() { None } else { Some(description) },
        })
    }

    async fn refresh_and_render_proxies(
        &mut self,
        client: &ApiClient,
        cache: &mut QueryCache,
        view: &mut ProxyListView,
    ) -> Result<()> {
        if let Err(e) = view.refresh(client, cache).await {
            // keep whatever was rendered before
            self.notify(&e)?;
            return Ok(());
        }
        self.render_proxy_page(view)
    }

    fn render_proxy_page(&mut self, view: &ProxyListView) -> Result<()> {
        let Some(page) = view.current() else {
            return Ok(());
        };

        if page.is_empty() {
            writeln!(self.output, "No proxies yet. Use 'add' to create one.")?;
        } else {
            writeln!(self.output)?;
            writeln!(
                self.output,
                "{:<6} {:<20} {:<32} {:<24} {:<20} {:<20}",
                "ID", "Name", "URI", "Description", "Created", "Updated"
            )?;
            writeln!(self.output, "{}", "-".repeat(126))?;
            for proxy in &page.content {
                writeln!(
                    self.output,
                    "{:<6} {:<20} {:<32} {:<24} {:<20} {:<20}",
                    proxy.id,
                    truncate(&proxy.name, 18),
                    truncate(&proxy.uri, 30),
                    truncate(proxy.description.as_deref().unwrap_or(""), 22),
                    truncate(&proxy.created_at, 19),
                    truncate(proxy.updated_at.as_deref().unwrap_or(""), 19),
                )?;
            }
            writeln!(self.output)?;
        }

        writeln!(
            self.output,
            "Page {}/{} ({} records) [prev: {}, next: {}]",
            page.current_page + 1,
            page.total_pages.max(1),
            page.total_elements,
            if view.has_previous() { "available" } else { "-" },
            if view.has_next() { "available" } else { "-" },
        )?;
        Ok(())
    }

    // === route list screen ===

    async fn handle_route_command(
        &mut self,
        client: &ApiClient,
        cache: &mut QueryCache,
        view: &mut RouteListView,
        command: &str,
        args: &[String],
    ) -> Result<Transition> {
        match command {
            "help" => self.print_route_help()?,
            "list" | "ls" => {
                self.refresh_and_render_routes(client, cache, view).await?;
            }
            "show" => match args.first() {
                Some(route_id) if view.select(route_id) => {
                    if let Some(route) = view.selected().cloned() {
                        self.render_route_detail(&route)?;
                    }
                }
                Some(route_id) => writeln!(self.output, "no route '{route_id}'")?,
                None => writeln!(self.output, "usage: show <route-id>")?,
            },
            "enable" | "disable" => {
                let enabled = command == "enable";
                match args.first() {
                    Some(route_id) => {
                        match view.toggle(client, cache, route_id, enabled).await {
                            Ok(()) => {
                                self.refresh_and_render_routes(client, cache, view).await?;
                            }
                            Err(e) => self.notify(&e)?,
                        }
                    }
                    None => writeln!(self.output, "usage: {command} <route-id>")?,
                }
            }
            "add" => {
                let mut form = self.prompt_route_form(None)?;
                loop {
                    match view.submit(client, cache, &form, false).await {
                        Ok(saved) => {
                            writeln!(self.output, "route '{}' added", saved.route_id)?;
                            self.refresh_and_render_routes(client, cache, view).await?;
                            break;
                        }
                        Err(e) => {
                            self.notify(&e)?;
                            if !self.confirm("Edit and retry?")? {
                                break;
                            }
                            form = self.prompt_route_form(Some(form))?;
                        }
                    }
                }
            }
            "edit" => {
                let Some(route_id) = args.first() else {
                    writeln!(self.output, "usage: edit <route-id>")?;
                    return Ok(Transition::Stay);
                };
                let Some(existing) = view.find(route_id).cloned() else {
                    writeln!(self.output, "no route '{route_id}'")?;
                    return Ok(Transition::Stay);
                };
                let prefill = match RouteForm::from_route(&existing) {
                    Ok(form) => form,
                    Err(e) => {
                        self.notify(&e)?;
                        return Ok(Transition::Stay);
                    }
                };
                let mut form = self.prompt_route_form(Some(prefill))?;
                loop {
                    match view.submit(client, cache, &form, true).await {
                        Ok(saved) => {
                            writeln!(self.output, "route '{}' updated", saved.route_id)?;
                            self.refresh_and_render_routes(client, cache, view).await?;
                            break;
                        }
                        Err(e) => {
                            self.notify(&e)?;
                            if !self.confirm("Edit and retry?")? {
                                break;
                            }
                            form = self.prompt_route_form(Some(form))?;
                        }
                    }
                }
            }
            "back" => return Ok(Transition::Back),
            "quit" | "exit" => return Ok(Transition::Quit),
            other => writeln!(self.output, "unknown command '{other}', try 'help'")?,
        }

        Ok(Transition::Stay)
    }

    fn print_route_help(&mut self) -> Result<()> {
        writeln!(self.output, "commands:")?;
        writeln!(self.output, "  list                 show this proxy's routes")?;
        writeln!(self.output, "  show <route-id>      show route details")?;
        writeln!(self.output, "  enable <route-id>    enable a route")?;
        writeln!(self.output, "  disable <route-id>   disable a route")?;
        writeln!(self.output, "  add                  add a route")?;
        writeln!(self.output, "  edit <route-id>      edit a route")?;
        writeln!(self.output, "  back                 return to the proxy list")?;
        writeln!(self.output, "  quit                 leave the console")?;
        Ok(())
    }

    fn prompt_route_form(&mut self, existing: Option<RouteForm>) -> Result<RouteForm> {
        let editing = existing.is_some();
        let mut form = existing.unwrap_or_default();

        form.route_id = self.prompt_with_default("Route id", &form.route_id)?;
        form.path = self.prompt_with_default("Path", &form.path)?;

        let methods = HttpMethod::ALL.map(|m| m.as_str()).join(", ");
        let current_method = form.method.map(|m| m.as_str().to_string()).unwrap_or_default();
        let answer = self.prompt_with_default(&format!("Method ({methods})"), &current_method)?;
        form.method = if answer.is_empty() { None } else { Some(answer.parse()?) };

        let collect_headers = if editing && !form.headers.is_empty() {
            self.confirm(&format!("Replace the {} existing header rule(s)?", form.headers.len()))?
        } else {
            true
        };
        if collect_headers {
            form.headers.clear();
            while self.confirm("Add a header rule?")? {
                let key = self.prompt("Header key")?;
                let value = self.prompt("Header value")?;
                let rule = if self.confirm("Only when not already present?")? {
                    HeaderRuleType::AddRequestHeaderIfNotPresent
                } else {
                    HeaderRuleType::AddRequestHeader
                };
                form.add_header(RouteHeader { key, value, rule });
            }
        }

        let collect_cookies = if editing && !form.cookies.is_empty() {
            self.confirm(&format!("Replace the {} existing cookie rule(s)?", form.cookies.len()))?
        } else {
            true
        };
        if collect_cookies {
            form.cookies.clear();
            while self.confirm("Add a cookie rule?")? {
                let name = self.prompt("Cookie name")?;
                let regexp = self.prompt("Cookie value regex")?;
                form.add_cookie(RouteCookie { name, regexp });
            }
        }

        let activation = self.prompt_with_default(
            "Activation time (YYYY-MM-DDTHH:MM local, blank for none)",
            form.activation_time.as_deref().unwrap_or(""),
        )?;
        form.activation_time = if activation.is_empty() { None } else { Some(activation) };

        let expiration = self.prompt_with_default(
            "Expiration time (YYYY-MM-DDTHH:MM local, blank for none)",
            form.expiration_time.as_deref().unwrap_or(""),
        )?;
        form.expiration_time = if expiration.is_empty() { None } else { Some(expiration) };

        Ok(form)
    }

    async fn refresh_and_render_routes(
        &mut self,
        client: &ApiClient,
        cache: &mut QueryCache,
        view: &mut RouteListView,
    ) -> Result<()> {
        if let Err(e) = view.refresh(client, cache).await {
            self.notify(&e)?;
            return Ok(());
        }
        self.render_route_list(view)
    }

    fn render_route_list(&mut self, view: &RouteListView) -> Result<()> {
        let routes = view.routes();
        if routes.is_empty() {
            writeln!(self.output, "No routes for '{}' yet.", view.proxy())?;
            return Ok(());
        }

        writeln!(self.output)?;
        writeln!(
            self.output,
            "{:<20} {:<32} {:<8} {:<8}",
            "Route ID", "Path", "Method", "Status"
        )?;
        writeln!(self.output, "{}", "-".repeat(71))?;
        for route in routes {
            writeln!(
                self.output,
                "{:<20} {:<32} {:<8} {:<8}",
                truncate(&route.route_id, 18),
                truncate(&route.path, 30),
                route.method,
                if route.enabled { "enabled" } else { "disabled" },
            )?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    fn render_route_detail(&mut self, route: &Route) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Route {}", route.route_id)?;
        writeln!(
            self.output,
            "  {} {} ({})",
            route.method,
            route.path,
            if route.enabled { "enabled" } else { "disabled" },
        )?;

        writeln!(self.output, "  Activation window:")?;
        writeln!(
            self.output,
            "    activates: {}",
            route.activation_time.as_deref().unwrap_or("-")
        )?;
        writeln!(
            self.output,
            "    expires:   {}",
            route.expiration_time.as_deref().unwrap_or("-")
        )?;

        writeln!(self.output, "  Request headers:")?;
        if route.headers.is_empty() {
            writeln!(self.output, "    (none)")?;
        }
        for header in &route.headers {
            let condition = match header.rule {
                HeaderRuleType::AddRequestHeader => "always",
                HeaderRuleType::AddRequestHeaderIfNotPresent => "only if absent",
            };
            writeln!(self.output, "    {}: {} ({})", header.key, header.value, condition)?;
        }

        if let Some(cookies) = &route.cookies {
            writeln!(self.output, "  Cookie rules:")?;
            for cookie in cookies {
                writeln!(self.output, "    {} ~ {}", cookie.name, cookie.regexp)?;
            }
        }
        writeln!(self.output)?;
        Ok(())
    }

    // === prompt helpers ===

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut buffer = String::new();
        if self.input.read_line(&mut buffer)? == 0 {
            return Ok(None);
        }
        Ok(Some(buffer.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn prompt(&mut self, label: &str) -> Result<String> {
        Ok(self.read_line(&format!("{label}: "))?.unwrap_or_default().trim().to_string())
    }

    fn prompt_with_default(&mut self, label: &str, default: &str) -> Result<String> {
        let answer = if default.is_empty() {
            self.prompt(label)?
        } else {
            self.read_line(&format!("{label} [{default}]: "))?
                .unwrap_or_default()
                .trim()
                .to_string()
        };

        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.read_line(&format!("{question} (y/N) "))?.unwrap_or_default();
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }

    fn parse_id(&mut self, arg: Option<&String>) -> Result<Option<i64>> {
        match arg.map(|a| a.parse::<i64>()) {
            Some(Ok(id)) => Ok(Some(id)),
            Some(Err(_)) => {
                writeln!(self.output, "expected a numeric proxy id")?;
                Ok(None)
            }
            None => {
                writeln!(self.output, "missing proxy id")?;
                Ok(None)
            }
        }
    }

    fn notify(&mut self, error: &Error) -> Result<()> {
        writeln!(self.output, "error: {error}")?;
        Ok(())
    }
}
