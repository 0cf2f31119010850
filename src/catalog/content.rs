use super::{CareerRole, ContentCatalog, Deadline, DeadlineStatus, Track, Workshop};

pub static ICADC_2026: ContentCatalog = ContentCatalog {
    deadlines: DEADLINES,
    tracks: TRACKS,
    workshops: WORKSHOPS,
    careers: CAREERS,
};

const DEADLINES: &[Deadline] = &[
    Deadline {
        label: "Submission Deadline",
        date: "30 May 2026",
        status: DeadlineStatus::Open,
    },
    Deadline {
        label: "Notification",
        date: "30 July 2026",
        status: DeadlineStatus::Upcoming,
    },
    Deadline {
        label: "Camera Ready",
        date: "30 Aug 2026",
        status: DeadlineStatus::Pending,
    },
    Deadline {
        label: "Registration Closes",
        date: "15 Sep 2026",
        status: DeadlineStatus::Pending,
    },
];

const TRACKS: &[Track] = &[
    Track {
        id: 1,
        category: "Intelligence",
        title: "Advanced Threat Detection",
        topics: &[
            "Real-Time Anomaly Detection",
            "Reinforcement Learning for Behavioral Classification",
            "Graph Neural Networks for APT Attribution",
        ],
    },
    Track {
        id: 2,
        category: "Intelligence",
        title: "Secure & Trustworthy AI",
        topics: &[
            "Defending Against Adversarial Attacks",
            "Federated Learning for Privacy",
            "Explainable AI (XAI) for SOC",
        ],
    },
    Track {
        id: 3,
        category: "Generative AI",
        title: "Generative AI in Cyber",
        topics: &[
            "LLMs for Vulnerability Exploitation",
            "Diffusion Models for Attack Generation",
            "GAN-Based Synthetic Data Augmentation",
        ],
    },
    Track {
        id: 4,
        category: "Infrastructure",
        title: "Zero-Trust Architectures",
        topics: &[
            "Behavioral Biometrics",
            "AI-Orchestrated Micro-Segmentation",
            "Dynamic Risk-Based Access Control",
        ],
    },
    Track {
        id: 5,
        category: "Infrastructure",
        title: "IoT & Edge Security",
        topics: &[
            "Edge AI for DDoS Mitigation",
            "Lightweight Deep Learning for IoT",
            "AI-Driven Anomaly Detection in ICS",
        ],
    },
    Track {
        id: 6,
        category: "Governance",
        title: "Ethics & Policy",
        topics: &[
            "Bias Mitigation Strategies",
            "GDPR & NIST Perspectives",
            "Ethical Frameworks for Autonomous Defense",
        ],
    },
    Track {
        id: 7,
        category: "Industry",
        title: "Industry Case Studies",
        topics: &[
            "Deploying AI-Augmented SOCs",
            "Generative AI for Zero-Day Detection",
            "Public-Private Partnerships",
        ],
    },
    Track {
        id: 8,
        category: "Foundations",
        title: "Modern Cryptography",
        topics: &[
            "Lightweight Cryptography",
            "Homomorphic Encryption",
            "Protocols for Secure Communication",
        ],
    },
    Track {
        id: 9,
        category: "Foundations",
        title: "Quantum Computing",
        topics: &[
            "Quantum-Resistant Security",
            "Quantum Key Distribution",
            "Quantum Random Number Generation",
        ],
    },
    Track {
        id: 10,
        category: "Governance",
        title: "GRC & Auditing",
        topics: &[
            "Auditing & Compliance",
            "Risk Analysis Measures",
            "Standards for Security & Privacy",
        ],
    },
];

const WORKSHOPS: &[Workshop] = &[
    Workshop {
        title: "Hands-on TensorFlow for Building AI Intrusion Detection Systems",
        description: "A practical deep dive into building production-ready IDS using the latest TensorFlow frameworks.",
        seats: 24,
    },
    Workshop {
        title: "PyTorch Implementation of Adversarial Robustness Training",
        description: "Learn to defend your models against sophisticated adversarial attacks using PyTorch.",
        seats: 18,
    },
    Workshop {
        title: "Practical Federated Learning for Collaborative Threat Detection",
        description: "Collaboratively train models without sharing sensitive raw data.",
        seats: 30,
    },
];

const CAREERS: &[CareerRole] = &[
    CareerRole {
        role: "AI Security Analyst",
    },
    CareerRole {
        role: "Network Security Engineer",
    },
    CareerRole {
        role: "Cybersecurity Consultant",
    },
    CareerRole {
        role: "AI Threat Intelligence",
    },
];
