//! Local view state for the mock dashboard.
//!
//! Each panel owns a plain state object with small update methods; nothing
//! is shared between panels. All data is fixed sample content.

/// Sidebar tabs, in display order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    Overview,
    Risk,
    Chains,
    Autopilot,
    Alerts,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Overview, Tab::Risk, Tab::Chains, Tab::Autopilot, Tab::Alerts];

    pub fn id(self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::Risk => "risk",
            Tab::Chains => "chains",
            Tab::Autopilot => "autopilot",
            Tab::Alerts => "alerts",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Portfolio",
            Tab::Risk => "AI Risk",
            Tab::Chains => "Chains",
            Tab::Autopilot => "Autopilot",
            Tab::Alerts => "Alerts",
        }
    }

    /// Unknown ids select the overview.
    pub fn from_id(id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.id() == id)
            .unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlertKind {
    Security,
    Risk,
    Opportunity,
    System,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
    pub id: String,
    pub kind: AlertKind,
    pub severity: Severity,
    pub title: String,
    /// Minutes since the alert was raised.
    pub age_minutes: u32,
    pub acknowledged: bool,
    pub action_required: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlertFilter {
    #[default]
    All,
    Kind(AlertKind),
}

impl AlertFilter {
    pub fn matches(self, alert: &Alert) -> bool {
        match self {
            AlertFilter::All => true,
            AlertFilter::Kind(k) => alert.kind == k,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AlertBoard {
    alerts: Vec<Alert>,
    filter: AlertFilter,
}

impl AlertBoard {
    pub fn new(alerts: Vec<Alert>) -> Self {
        Self {
            alerts,
            filter: AlertFilter::All,
        }
    }

    /// The four fixed alerts shown by the dashboard.
    pub fn sample() -> Self {
        let alert = |id: &str, kind, severity, title: &str, age_minutes, acknowledged, action_required| Alert {
            id: id.to_string(),
            kind,
            severity,
            title: title.to_string(),
            age_minutes,
            acknowledged,
            action_required,
        };
        Self::new(vec![
            alert("1", AlertKind::Security, Severity::Critical, "Unusual Transaction Pattern Detected", 5, false, true),
            alert("2", AlertKind::Risk, Severity::High, "Portfolio Risk Threshold Exceeded", 15, false, true),
            alert("3", AlertKind::Opportunity, Severity::Medium, "Arbitrage Opportunity Available", 30, true, false),
            alert("4", AlertKind::System, Severity::Low, "Chain Key Integration Updated", 120, true, false),
        ])
    }

    pub fn set_filter(&mut self, filter: AlertFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> AlertFilter {
        self.filter
    }

    /// Alerts passing the current filter, in original order.
    pub fn visible(&self) -> impl Iterator<Item = &Alert> + '_ {
        self.alerts.iter().filter(move |a| self.filter.matches(a))
    }

    /// Marks an alert acknowledged. Returns `false` for unknown ids.
    pub fn acknowledge(&mut self, id: &str) -> bool {
        match self.alerts.iter_mut().find(|a| a.id == id) {
            Some(alert) => {
                alert.acknowledged = true;
                true
            }
            None => false,
        }
    }

    /// Counted across all alerts, ignoring the filter.
    pub fn unacknowledged_count(&self) -> usize {
        self.alerts.iter().filter(|a| !a.acknowledged).count()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Strategy {
    pub id: &'static str,
    pub name: &'static str,
    pub risk: RiskLevel,
    /// Percent per year.
    pub expected_return: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionStatus {
    Pending,
    Executing,
    Completed,
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RebalanceAction {
    pub id: String,
    pub from: &'static str,
    pub to: &'static str,
    pub amount: f64,
    pub reason: &'static str,
    pub status: ActionStatus,
}

#[derive(Clone, Debug, Default)]
pub struct AutopilotPanel {
    pub enabled: bool,
    selected: Option<&'static str>,
    strategies: Vec<Strategy>,
    actions: Vec<RebalanceAction>,
}

impl AutopilotPanel {
    /// Three strategies with "balanced" selected and two pending actions.
    pub fn sample() -> Self {
        let strategies = vec![
            Strategy { id: "conservative", name: "Conservative Growth", risk: RiskLevel::Low, expected_return: 8.5 },
            Strategy { id: "balanced", name: "Balanced Portfolio", risk: RiskLevel::Medium, expected_return: 15.2 },
            Strategy { id: "aggressive", name: "Aggressive Growth", risk: RiskLevel::High, expected_return: 28.4 },
        ];
        let actions = vec![
            RebalanceAction {
                id: "1".to_string(),
                from: "BTC",
                to: "ETH",
                amount: 0.05,
                reason: "Reduce concentration risk",
                status: ActionStatus::Pending,
            },
            RebalanceAction {
                id: "2".to_string(),
                from: "SOL",
                to: "USDC",
                amount: 15.2,
                reason: "Volatility hedge",
                status: ActionStatus::Pending,
            },
        ];
        Self {
            enabled: true,
            selected: Some("balanced"),
            strategies,
            actions,
        }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Selects a strategy by id. Unknown ids leave the selection alone.
    pub fn select(&mut self, id: &str) -> bool {
        match self.strategies.iter().find(|s| s.id == id) {
            Some(s) => {
                self.selected = Some(s.id);
                true
            }
            None => false,
        }
    }

    pub fn selected(&self) -> Option<&Strategy> {
        let id = self.selected?;
        self.strategies.iter().find(|s| s.id == id)
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    pub fn actions(&self) -> &[RebalanceAction] {
        &self.actions
    }

    /// Moves every pending action to executing. Returns how many moved.
    pub fn execute_all(&mut self) -> usize {
        let mut moved = 0;
        for a in self.actions.iter_mut().filter(|a| a.status == ActionStatus::Pending) {
            a.status = ActionStatus::Executing;
            moved += 1;
        }
        moved
    }

    /// Clears the executing actions once the mock execution delay is over.
    pub fn finish_execution(&mut self) {
        self.actions.retain(|a| a.status != ActionStatus::Executing);
    }
}

/// All dashboard state owned by the dashboard view.
#[derive(Clone, Debug, Default)]
pub struct DashboardState {
    pub tab: Tab,
    pub alerts: AlertBoard,
    pub autopilot: AutopilotPanel,
}

impl DashboardState {
    pub fn sample() -> Self {
        Self {
            tab: Tab::Overview,
            alerts: AlertBoard::sample(),
            autopilot: AutopilotPanel::sample(),
        }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }
}
