/// Project timeline keyed by body. Each record drives the info panel, the
/// planet list entry, and the search index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectRecord {
    pub key: &'static str,
    pub bubble_color: &'static str,
    pub title: &'static str,
    pub short_title: &'static str,
    pub term: &'static str,
    pub focus: &'static str,
    pub role: &'static str,
    pub team: &'static str,
    pub summary: &'static str,
    /// Planet list position: higher orders are listed first.
    pub order: i32,
    pub page: &'static str,
    pub button_label: Option<&'static str>,
    pub button_icon: Option<&'static str>,
    pub contributions: &'static [&'static str],
    pub technologies: &'static str,
}

impl ProjectRecord {
    /// Short display label, falling back to the full title.
    pub fn label(&self) -> &'static str {
        if self.short_title.is_empty() {
            self.title
        } else {
            self.short_title
        }
    }

    /// Lowercased text the search widget matches against.
    pub fn search_text(&self) -> String {
        [self.key, self.title, self.short_title, self.focus, self.term, self.team, self.summary]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

pub const PROJECTS: [ProjectRecord; 8] = [
    ProjectRecord {
        key: "sun",
        bubble_color: "#ffb347",
        title: "Generative Adversarial Network for Human Action Generation",
        short_title: "Capstone Thesis",
        term: "Fall 2025",
        focus: "Text-to-motion generation research",
        role: "Lead researcher",
        team: "Individual project",
        summary: "Built a hybrid ST-GCN and DST-Transformer pipeline that turns open-ended text into coherent human motion while balancing fidelity and controllability.",
        order: 8,
        page: "capstone.html",
        button_label: Some("Capstone"),
        button_icon: Some("🡪"),
        contributions: &[
            "Combined ST-GCN generators with DST-Transformer critics to capture local joint dynamics and global semantics.",
            "Created an evaluation suite with Reality Gap, FGD, and APE to expose where metrics diverge from perceived motion quality.",
            "Packaged insights into interactive dashboards and videos for faculty and industry reviewers.",
        ],
        technologies: "PyTorch | ST-GCN | Transformers | Python | Linux",
    },
    ProjectRecord {
        key: "mercury",
        bubble_color: "#b2b2b2",
        title: "TETRECS Multiplayer",
        short_title: "TETRECS",
        term: "Fall 2023",
        focus: "Realtime JavaFX game development",
        role: "Solo developer",
        team: "Individual project",
        summary: "Built a JavaFX spin on Tetris with polished single-player controls and a social multiplayer lobby where friends battle in real time.",
        order: 1,
        page: "tetrecs.html",
        button_label: Some("Play Demo"),
        button_icon: Some("🎮"),
        contributions: &[
            "Coded smooth block movement, rotation, and scoring loops so single-player feels as responsive as the original classics.",
            "Added realtime multiplayer: players host rooms, chat, and watch incoming garbage lines as they attack each other.",
            "Designed an intuitive JavaFX UI with keyboard shortcuts, tooltips, and onboarding screens for new players.",
        ],
        technologies: "Java | JavaFX | Realtime networking | UI design",
    },
    ProjectRecord {
        key: "venus",
        bubble_color: "#ffd27f",
        title: "Interaction Design Coursework: Energy Garden",
        short_title: "Interaction Design Coursework",
        term: "Spring 2024",
        focus: "Behaviour-change UX research",
        role: "Design researcher & prototyper",
        team: "3-person studio team",
        summary: "Researched household energy habits and prototyped a gamified “Energy Garden” app that rewards sustainable routines without sacrificing comfort.",
        order: 2,
        page: "interaction_design.html",
        button_label: Some("View Case Study"),
        button_icon: Some("🌱"),
        contributions: &[
            "Interviewed renters and families, mapped themes around convenience, comfort, cost, scheduling, cognition, and environmental motivation.",
            "Framed the core problem as behaviour change over automation and storyboarded motivational loops (streaks, forest health, battery bank).",
            "Built iterative Figma prototypes and system flows that link smart-meter data to playful progress visualisations.",
        ],
        technologies: "Figma | Miro | User interviews | Storyboarding | Behavioural design",
    },
    ProjectRecord {
        key: "earth",
        bubble_color: "#4da6ff",
        title: "Ad Auction Intelligence Dashboard",
        short_title: "Ad Auction Dashboard",
        term: "Spring 2024",
        focus: "Campaign analytics & visualization",
        role: "Data dashboard engineer",
        team: "4 developers",
        summary: "Delivered a role-based web dashboard that ingests campaign logs, visualizes auction KPIs, and lets marketing teams explore results with rich filters.",
        order: 3,
        page: "ad_auction_dashboard.html",
        button_label: Some("View Dashboard"),
        button_icon: Some("📊"),
        contributions: &[
            "Parsed server, impression, and click logs from uploaded zip files, joining them into a unified metrics model.",
            "Implemented filters for age, user ID, context, and date so analysts can slice performance in seconds.",
            "Built role-specific workflows: admins manage users and campaigns, editors tweak filters, and viewers explore charts and export CSV/PNG reports.",
        ],
        technologies: "Python | Flask | React | D3.js | Role-based access control",
    },
    ProjectRecord {
        key: "mars",
        bubble_color: "#ee8156",
        title: "Distributed File System",
        short_title: "Distributed Storage Service",
        term: "Fall 2024",
        focus: "Fault-tolerant storage design",
        role: "Systems engineer",
        team: "Individual project",
        summary: "Implemented a Java-based controller plus Dstores that replicate, rebalance, and serve files concurrently over TCP.",
        order: 4,
        page: "distributed_file_system.html",
        button_label: None,
        button_icon: None,
        contributions: &[
            "Implemented controller and Dstores with a mixed text/binary protocol, timeouts, and acknowledgements for reliable messaging.",
            "Designed lifecycle index states (\"store in progress\", \"store complete\", \"remove in progress\") to ensure correctness under concurrency.",
            "Balanced file placement with R-way replication, periodic rebalancing, and JOIN handling for new Dstores.",
            "Added recovery flows for dropped Dstores and ran multi-client concurrency tests on OpenJDK 21.",
        ],
        technologies: "Java | TCP sockets | Multithreading | Data structures | Linux",
    },
    ProjectRecord {
        key: "jupiter",
        bubble_color: "#c28f5b",
        title: "MYKEY Graph Query Language",
        short_title: "PL Concepts",
        term: "Fall 2024",
        focus: "DSL design & static analysis",
        role: "Language designer & implementer",
        team: "Individual project",
        summary: "Specified and implemented MYKEY, a declarative query language for Neo4j graphs with static scoping, strict typing, and rich graph operators.",
        order: 5,
        page: "programming_language_concepts.html",
        button_label: Some("Case Study"),
        button_icon: Some("🧠"),
        contributions: &[
            "Defined grammar, lexer, and parser rules for nodes, relationships, optional matches, and custom operators such as EACH/BY and NOT IN.",
            "Implemented static scoping and type checking to guarantee boolean WHERE clauses, well-typed property updates, and safe aggregations before runtime.",
            "Engineered graph conversion structures and informative compiler errors to bridge CSV imports with Neo4j-oriented execution.",
        ],
        technologies: "Haskell | Parser combinators | Static analysis | Neo4j | DSL design",
    },
    ProjectRecord {
        key: "saturn",
        bubble_color: "#f2d4a3",
        title: "K-Means Cluster Selection Study",
        short_title: "Machine Learning Techniques",
        term: "Fall 2025",
        focus: "Unsupervised NLP analysis",
        role: "Research author",
        team: "Individual study",
        summary: "Evaluated K-Means variants on high-frequency word co-occurrence matrices to determine an optimal cluster strategy guided by Occam’s Razor.",
        order: 7,
        page: "machine_learning_report.html",
        button_label: Some("Report"),
        button_icon: Some("📄"),
        contributions: &[
            "Preprocessed corpora with stemming, stop-word removal, and frequency curation to isolate 10k salient tokens.",
            "Constructed and normalised co-occurrence matrices (window size 15) to stabilise distance metrics for clustering.",
            "Benchmarked K values 2-9 via KMeans++ initialisation, K-fold Silhouette/WCSS analysis, and selected K=4 as the simplest performant model.",
        ],
        technologies: "Python | Scikit-learn | NLP preprocessing | K-Means | Data visualisation",
    },
    ProjectRecord {
        key: "uranus",
        bubble_color: "#7de3f5",
        title: "Cloud Application Development",
        short_title: "Cloud App Development",
        term: "Fall 2025",
        focus: "Cloud-native full-stack service",
        role: "Full-stack engineer",
        team: "Cross-functional team",
        summary: "Developed and deployed a cross-platform web app with an Azure backend, GCP frontend, and LLM-powered personalization.",
        order: 6,
        page: "cloud_application_development.html",
        button_label: Some("Launch"),
        button_icon: Some("🚀"),
        contributions: &[
            "Designed and implemented a RESTful Python API with authentication, validation, and rate limiting.",
            "Integrated CORS policies and CI/CD pipelines so multiple clients could consume the API securely.",
            "Containerized services, deploying the backend on Azure and the frontend on GCP for low-latency coverage.",
            "Hooked LLM APIs into the service layer to deliver tailored recommendations and summaries.",
        ],
        technologies: "Python | REST APIs | Vue.js | JavaScript | Azure | GCP | Docker | CI/CD | LLM APIs",
    },
];

pub fn project(key: &str) -> Option<&'static ProjectRecord> {
    PROJECTS.iter().find(|p| p.key == key)
}

// ── Search ───────────────────────────────────────────────────────────

/// Precomputed lowercase text per project, in table order.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    entries: Vec<(&'static str, String)>,
}

impl SearchIndex {
    pub fn build() -> Self {
        Self {
            entries: PROJECTS.iter().map(|p| (p.key, p.search_text())).collect(),
        }
    }

    /// Key of the first project whose text contains `query` (trimmed,
    /// case-insensitive). Blank queries match nothing.
    pub fn find(&self, query: &str) -> Option<&'static str> {
        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|(_, text)| text.contains(&term))
            .map(|(key, _)| *key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::build()
    }
}
